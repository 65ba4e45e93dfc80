//! Built-in content used when a category cannot be loaded
//!
//! Every category has a small compiled-in payload with the same shape the live
//! documents use, so presentation code never has to special-case a failure.

use serde_json::{json, Value};

use super::{AggregatedContent, Category, Resolved};

/// Returns the built-in payload for `category`
pub fn fallback_payload(category: Category) -> Value {
    match category {
        Category::User => json!({
            "name": "Alex Morgan",
            "title": "Developer & Security Enthusiast",
            "bio": "I build things for the web and break things to make them safer.",
            "location": "Remote",
            "email": "hello@example.com",
            "social": {
                "github": "https://github.com/",
                "linkedin": "https://www.linkedin.com/"
            }
        }),
        Category::Webdev => json!({
            "skills": [
                { "name": "HTML & CSS", "level": 90, "icon": "code" },
                { "name": "JavaScript", "level": 85, "icon": "js" },
                { "name": "Responsive Design", "level": 80, "icon": "mobile" }
            ],
            "projects": [
                {
                    "title": "Portfolio Website",
                    "description": "A themeable personal site driven by JSON content.",
                    "tags": ["HTML", "CSS", "JavaScript"],
                    "link": "#"
                }
            ]
        }),
        Category::Cyber => json!({
            "skills": [
                { "name": "Network Security", "level": 80, "icon": "shield" },
                { "name": "Penetration Testing", "level": 75, "icon": "bug" },
                { "name": "Linux Administration", "level": 85, "icon": "terminal" }
            ],
            "projects": [
                {
                    "title": "Home Lab",
                    "description": "A segmented lab network for practising attack and defence.",
                    "tags": ["Networking", "Linux", "Firewalls"],
                    "link": "#"
                }
            ]
        }),
        Category::Books => json!([
            {
                "title": "The Art of War",
                "author": "Sun Tzu",
                "description": "Ancient strategy that still applies to modern security."
            },
            {
                "title": "The Pragmatic Programmer",
                "author": "Andrew Hunt & David Thomas",
                "description": "Practical habits for writing software that lasts."
            }
        ]),
        Category::Interests => json!({
            "heroes": [
                { "name": "Ada Lovelace", "reason": "Wrote the first published algorithm." }
            ],
            "interests": [
                { "name": "Open Source", "description": "Contributing to shared tools." }
            ],
            "hobbies": [
                { "name": "Chess", "description": "Long games, short openings." }
            ]
        }),
        Category::Quotes => json!([
            {
                "text": "The supreme art of war is to subdue the enemy without fighting.",
                "author": "Sun Tzu"
            }
        ]),
    }
}

/// Returns the complete built-in content, every entry tagged as fallback
pub fn fallback_content() -> AggregatedContent {
    AggregatedContent::from_fn(Resolved::fallback)
}
