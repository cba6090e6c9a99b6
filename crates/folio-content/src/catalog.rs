// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The content catalog: suggestion prompts, slash commands, and canned
//! replies.  Lists are ordered; catalog order is the tie-break everywhere
//! downstream, so the order here is part of the contract.

/// A canned visitor prompt offered by the suggestion list.
#[derive(Debug, Clone)]
pub struct PromptEntry {
    /// The query submitted when the prompt is chosen.
    pub query: &'static str,
    /// Short chip label.
    pub label: &'static str,
}

/// A slash command that expands to a visitor query on submit.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    /// Keyword after the `/` prefix.
    pub name: &'static str,
    /// One-line description shown in the suggestion list.
    pub description: &'static str,
    /// The expansion query submitted when the command runs.
    pub query: &'static str,
}

/// A landing topic that seeds the conversation with a pre-written pair
/// instead of calling the completion service.
#[derive(Debug, Clone)]
pub struct TopicSeed {
    pub name: &'static str,
    /// The visitor turn the seed renders as.
    pub visitor: &'static str,
    /// The pre-written assistant reply.
    pub reply: &'static str,
}

/// An exact visitor text with a pre-written reply.  Checked at submit time;
/// a hit short-circuits the completion service entirely.
#[derive(Debug, Clone)]
pub struct CannedReply {
    pub visitor: &'static str,
    pub reply: &'static str,
}

pub struct ContentCatalog {
    prompts: Vec<PromptEntry>,
    commands: Vec<CommandEntry>,
    topics: Vec<TopicSeed>,
    canned: Vec<CannedReply>,
}

impl ContentCatalog {
    /// Build the full built-in catalog.
    pub fn builtin() -> Self {
        let topics = topics();
        let mut canned: Vec<CannedReply> = topics
            .iter()
            .map(|t| CannedReply { visitor: t.visitor, reply: t.reply })
            .collect();
        canned.extend(project_replies());
        Self {
            prompts: prompts(),
            commands: commands(),
            topics,
            canned,
        }
    }

    pub fn prompts(&self) -> &[PromptEntry] {
        &self.prompts
    }

    pub fn commands(&self) -> &[CommandEntry] {
        &self.commands
    }

    pub fn topics(&self) -> &[TopicSeed] {
        &self.topics
    }

    /// Look up a landing topic by name.
    pub fn topic(&self, name: &str) -> Option<&TopicSeed> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Return the pre-written reply registered for exactly this visitor
    /// text (after trimming), if any.
    pub fn canned_reply(&self, visitor_text: &str) -> Option<&'static str> {
        let text = visitor_text.trim();
        self.canned
            .iter()
            .find(|c| c.visitor == text)
            .map(|c| c.reply)
    }

    /// Empty-state greeting shown before the first turn.
    pub fn greeting(&self) -> &'static str {
        "Hi, I'm Amy — ask me about my work, projects, or anything else."
    }
}

fn prompts() -> Vec<PromptEntry> {
    vec![
        PromptEntry { query: "What is your background?", label: "Background" },
        PromptEntry { query: "What projects are you working on?", label: "Projects" },
        PromptEntry { query: "Tell me about PROVEN", label: "PROVEN" },
        PromptEntry { query: "Tell me about Durin", label: "Durin" },
        PromptEntry { query: "Tell me about Noteworthy", label: "Noteworthy" },
        PromptEntry { query: "What's your technical stack?", label: "Technical" },
        PromptEntry { query: "How did you scale to $150M?", label: "Scaling" },
        PromptEntry { query: "What are your research interests?", label: "Research" },
        PromptEntry { query: "Tell me about your mountaineering", label: "Mountaineering" },
        PromptEntry { query: "How can I contact you?", label: "Contact" },
    ]
}

fn commands() -> Vec<CommandEntry> {
    vec![
        CommandEntry {
            name: "proven",
            description: "PROVEN — AI-personalized skincare, $150M+ revenue",
            query: "Tell me about PROVEN",
        },
        CommandEntry {
            name: "durin",
            description: "Durin — AI infrastructure",
            query: "Tell me about Durin",
        },
        CommandEntry {
            name: "noteworthy",
            description: "Noteworthy — fragrance personalization",
            query: "Tell me about Noteworthy",
        },
        CommandEntry {
            name: "technical",
            description: "Technical background and stack",
            query: "What's your technical background?",
        },
        CommandEntry {
            name: "research",
            description: "Publications and patents",
            query: "What are your research interests?",
        },
        CommandEntry {
            name: "climbing",
            description: "Mountaineering",
            query: "Tell me about your mountaineering",
        },
        CommandEntry {
            name: "contact",
            description: "How to get in touch",
            query: "How can I contact you?",
        },
    ]
}

fn topics() -> Vec<TopicSeed> {
    vec![
        TopicSeed {
            name: "about",
            visitor: "Tell me about yourself",
            reply: ABOUT_REPLY,
        },
        TopicSeed {
            name: "projects",
            visitor: "What projects are you working on?",
            reply: PROJECTS_REPLY,
        },
        TopicSeed {
            name: "research",
            visitor: "What are your research interests?",
            reply: RESEARCH_REPLY,
        },
        TopicSeed {
            name: "climbing",
            visitor: "Tell me about your mountaineering",
            reply: CLIMBING_REPLY,
        },
    ]
}

fn project_replies() -> Vec<CannedReply> {
    vec![
        CannedReply { visitor: "Tell me about PROVEN", reply: PROVEN_REPLY },
        CannedReply { visitor: "Tell me about Durin", reply: DURIN_REPLY },
        CannedReply { visitor: "Tell me about Noteworthy", reply: NOTEWORTHY_REPLY },
        CannedReply { visitor: "How can I contact you?", reply: CONTACT_REPLY },
    ]
}

const ABOUT_REPLY: &str = "\
Amy spent years doing computational physics — PhD at USC, postdoc at \
Stanford, simulations on 163,840 cores. She was good at it, but kept \
escaping into side projects, building apps that hit top-10 charts while she \
was supposed to be doing research. Eventually she admitted to herself that \
she wanted to make things people actually use.

She went into healthcare AI, then co-founded PROVEN with Ming. The way \
people shop is broken: guess, buy, return, repeat. Amy built an AI system \
that learns individual preferences and adapts over time — a system that \
closes the feedback loop. It started with skincare, expanded to other \
categories, and scaled to $150M+.

Now she's building again, looking for the next thing that's real. She \
climbs mountains between projects — standing on a glacier that took a \
hundred thousand years to form helps her remember what she's optimizing for.";

const PROJECTS_REPLY: &str = "\
Three projects define Amy's recent work:

PROVEN — AI-powered personalization for skincare. Amy built the \
recommendation engine that learns individual preferences from feedback and \
adapts over time; the company scaled past $150M in total revenue.

Durin — AI infrastructure. Tooling for the systems underneath the models: \
making large-scale AI workloads practical to build and run.

Noteworthy — personalization applied to fragrance. The same thesis as \
PROVEN in a new category: recommendations that compound value for the \
customer instead of extracting it.

Ask about any of them — /proven, /durin, or /noteworthy.";

const RESEARCH_REPLY: &str = "\
Amy's research background is in large-scale computational physics: a PhD at \
USC and a postdoc at Stanford, with simulations run on 163,840 cores. Along \
the way she published 10 papers and holds 2 patents. These days her research \
interest is applied: personalization systems that keep learning after \
deployment, and the infrastructure that makes them cheap enough to matter.";

const CLIMBING_REPLY: &str = "\
In the mountains, pretense does not last. Breathe. Move. Decide. That is \
what remains.

Amy climbs snow, ice, and rock — each offers a different kind of freedom. \
Snow teaches impermanence; ice demands precision and honesty; rock invites \
movement and dialogue. The summit is not where meaning lives: what matters \
is what you learn on the way up, and what you carry back down.";

const PROVEN_REPLY: &str = "\
PROVEN is an AI-powered skincare personalization company Amy co-founded. \
The core is a recommendation system that learns individual preferences from \
purchase and feedback data and adapts formulations over time, closing the \
loop that guess-buy-return shopping leaves open. It started with skincare, \
expanded into adjacent categories, and scaled to more than $150M in total \
revenue.";

const DURIN_REPLY: &str = "\
Durin is Amy's current infrastructure project: tooling for building and \
operating large-scale AI systems. Where PROVEN proved the personalization \
thesis in one category, Durin works on the layer underneath — making it \
practical to run adaptive models in production without a research team \
babysitting them.";

const NOTEWORTHY_REPLY: &str = "\
Noteworthy applies Amy's personalization thesis to fragrance: scent \
preferences are individual, hard to articulate, and badly served by \
bestseller lists. Noteworthy learns a preference profile and recommends \
fragrances that fit it, improving with every interaction.";

const CONTACT_REPLY: &str = "\
The best way to reach Amy is email: amy@example.com. She's based in San \
Francisco, CA, and is also on LinkedIn (amyzyuan), GitHub (amylyra), and \
Twitter (@amyzyuan).";

// ─── Unit tests ──────────────────────────────────────────────────────────────
