// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod assistant;
mod events;
mod turn;

pub use assistant::{assistant_task, AssistantRequest, CancelHandle};
pub use events::AssistantEvent;
pub use turn::{request_messages, Turn, TurnRole};
