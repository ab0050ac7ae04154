#![forbid(unsafe_code)]

//! Static site content: page sections, featured projects and posts.

use crate::region::Region;

/// Page sections in document order. The first one is active on load.
pub const SECTIONS: [Region; 4] = [
    Region::new("hero", "Intro"),
    Region::new("projects", "Projects"),
    Region::new("essays", "Essays"),
    Region::new("contact", "Contact"),
];

/// Section the hero "View Projects" button scrolls to.
pub const HERO_CTA_TARGET: &str = "projects";

pub const GITHUB_PROFILE: &str = "https://github.com/JsonLee12138";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub stars: u32,
    pub language: &'static str,
    pub url: &'static str,
}

impl Project {
    /// DOM id of the project's card.
    #[must_use]
    pub fn element_id(&self) -> String {
        format!("project-{}", self.name)
    }

    #[must_use]
    pub fn accent(&self) -> LanguageAccent {
        LanguageAccent::for_language(self.language)
    }
}

pub const PROJECTS: [Project; 6] = [
    Project {
        name: "hook-fetch",
        description: "A lightweight and modern HTTP request library developed based on the native Fetch API, providing a user-friendly interface similar to Axios.",
        stars: 74,
        language: "TypeScript",
        url: "https://github.com/JsonLee12138/hook-fetch",
    },
    Project {
        name: "jsonix",
        description: "A web framework for Go like NestJS. Built for scalability and developer experience.",
        stars: 12,
        language: "Go",
        url: "https://github.com/JsonLee12138/jsonix",
    },
    Project {
        name: "markdown-it-mermaid",
        description: "Plugin for rendering Mermaid diagrams in markdown-it. Write Mermaid code blocks directly in Markdown files.",
        stars: 7,
        language: "JavaScript",
        url: "https://github.com/JsonLee12138/markdown-it-mermaid",
    },
    Project {
        name: "easy-websocket-client",
        description: "A Socket class for managing WebSocket connections with automatic reconnection and heartbeat messages.",
        stars: 5,
        language: "TypeScript",
        url: "https://github.com/JsonLee12138/easy-websocket-client",
    },
    Project {
        name: "json-search",
        description: "A custom browser search extension built with Vue.",
        stars: 4,
        language: "Vue",
        url: "https://github.com/JsonLee12138/json-search",
    },
    Project {
        name: "inspect.dev",
        description: "Web inspection tool wrapper allowing usage without login constraints.",
        stars: 3,
        language: "JavaScript",
        url: "https://github.com/JsonLee12138/inspect.dev",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Post {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub category: &'static str,
    pub excerpt: &'static str,
    pub slug: &'static str,
}

impl Post {
    #[must_use]
    pub fn href(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

pub const POSTS: [Post; 3] = [
    Post {
        id: "1",
        title: "The Future of React Server Components",
        date: "Feb 02, 2026",
        category: "Engineering",
        excerpt: "Exploring how RSCs are reshaping the mental model of frontend development and performance.",
        slug: "react-server-components",
    },
    Post {
        id: "2",
        title: "Building Resilient APIs with Go",
        date: "Jan 15, 2026",
        category: "Backend",
        excerpt: "Patterns for error handling, graceful shutdowns, and middleware design in Golang services.",
        slug: "resilient-apis-go",
    },
    Post {
        id: "3",
        title: "Minimalism in Digital Product Design",
        date: "Dec 10, 2025",
        category: "Design",
        excerpt: "Why removing features often adds more value than adding them. A case study on reduction.",
        slug: "minimalism-design",
    },
];

/// Dot color shown next to a project's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageAccent {
    Blue,
    Yellow,
    Cyan,
    Green,
    Gray,
}

impl LanguageAccent {
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        match language {
            "TypeScript" => Self::Blue,
            "JavaScript" => Self::Yellow,
            "Go" => Self::Cyan,
            "Vue" => Self::Green,
            _ => Self::Gray,
        }
    }

    /// Utility class the stylesheet defines for this accent.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Blue => "bg-blue-500",
            Self::Yellow => "bg-yellow-400",
            Self::Cyan => "bg-cyan-500",
            Self::Green => "bg-green-500",
            Self::Gray => "bg-gray-400",
        }
    }
}
