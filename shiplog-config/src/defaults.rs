//! Built-in ShipLog configuration
//!
//! The lowest-priority configuration source. An environment with no
//! configuration files still gets the build journal entity and the
//! free/starter/pro/team plan set.

use figment::{providers::Serialized, Figment};
use serde_json::{json, Value};
use tracing::debug;

/// Default configuration values provider
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// The full default configuration document.
    pub fn values() -> Value {
        json!({
            "entities": [Self::build_journal_entry()],
            "pricing": Self::pricing(),
        })
    }

    /// Figment holding only the defaults.
    pub fn figment() -> Figment {
        debug!("Loading default configuration values");
        Figment::new().merge(Serialized::defaults(Self::values()))
    }

    fn build_journal_entry() -> Value {
        json!({
            "name": "BuildJournalEntry",
            "plural_name": "BuildJournalEntries",
            "slug": "build_journal_entries",
            "icon": "book-open",
            "fields": [
                {
                    "name": "title",
                    "label": "Title",
                    "type": "text",
                    "required": true,
                    "placeholder": "Generated post title"
                },
                {
                    "name": "content",
                    "label": "Content",
                    "type": "rich-text",
                    "required": true,
                    "placeholder": "Generated build journal post content"
                },
                {
                    "name": "generated_date",
                    "label": "Generated Date",
                    "type": "date",
                    "required": true
                },
                {
                    "name": "status",
                    "label": "Status",
                    "type": "select",
                    "required": true,
                    "options": ["draft", "scheduled", "published", "archived"],
                    "default_value": "draft"
                },
                {
                    "name": "source_commits",
                    "label": "Source Commits",
                    "type": "tags",
                    "required": false,
                    "placeholder": "Commits used for generation",
                    "show_in_list": false,
                    "show_in_form": true
                },
                {
                    "name": "social_media_platform",
                    "label": "Social Media Platform",
                    "type": "multi-select",
                    "required": false,
                    "options": ["X", "LinkedIn", "Bluesky", "Dev.to"],
                    "show_in_list": false
                },
                {
                    "name": "public_url",
                    "label": "Public URL",
                    "type": "url",
                    "required": false,
                    "placeholder": "https://shiplog.dev/you/day-14",
                    "show_in_list": false
                }
            ],
            "title_field": "title",
            "description_field": "content",
            "default_sort": { "field": "generated_date", "direction": "desc" }
        })
    }

    fn pricing() -> Value {
        json!({
            "model": "freemium",
            "default_limits": { "entities": 4 },
            "plans": [
                {
                    "id": "free",
                    "name": "Free",
                    "description": "Start building in public with zero friction",
                    "price": { "monthly": 0 },
                    "limits": { "entities": 4 },
                    "features": [
                        "1 GitHub repo connected",
                        "Up to 4 posts per month",
                        "Basic changelog page with ShipLog branding",
                        "Manual review & approve workflow",
                        "Streak counter",
                        "Community support"
                    ],
                    "cta": "Get Started Free"
                },
                {
                    "id": "starter",
                    "name": "Starter",
                    "description": "For indie hackers serious about consistency",
                    "price": { "monthly": 9, "yearly": 79 },
                    "price_id": "${STRIPE_PRICE_STARTER}",
                    "limits": { "entities": 20 },
                    "features": [
                        "Unlimited GitHub repos",
                        "Up to 20 posts per month",
                        "Voice learning from 100 past tweets",
                        "Auto-posting to X/Twitter",
                        "Custom domain changelog page",
                        "Remove ShipLog branding",
                        "Basic engagement analytics",
                        "Email support"
                    ],
                    "cta": "Start 7-Day Trial"
                },
                {
                    "id": "pro",
                    "name": "Pro",
                    "description": "Full automation for prolific builders",
                    "price": { "monthly": 19, "yearly": 169 },
                    "price_id": "${STRIPE_PRICE_PRO}",
                    "limits": { "entities": -1 },
                    "features": [
                        "Everything in Starter",
                        "Unlimited posts",
                        "Full voice learning from entire tweet history",
                        "Auto-post to X, LinkedIn & Mastodon",
                        "Stripe revenue milestone posts",
                        "Vercel & Railway deployment logs",
                        "Weekly digest auto-generation",
                        "Advanced analytics & engagement tracking",
                        "Custom changelog themes",
                        "Priority AI processing",
                        "Priority support"
                    ],
                    "highlighted": true,
                    "cta": "Start 7-Day Trial"
                },
                {
                    "id": "team",
                    "name": "Team",
                    "description": "Build in public as a team",
                    "price": { "monthly": 49, "yearly": 449 },
                    "price_id": "${STRIPE_PRICE_TEAM}",
                    "limits": { "entities": -1 },
                    "features": [
                        "Everything in Pro",
                        "Up to 5 team members",
                        "Shared changelog with contributor attribution",
                        "Team review & approval workflow",
                        "Org-level GitHub integration",
                        "API access",
                        "Dedicated support"
                    ],
                    "cta": "Contact Us"
                }
            ]
        })
    }
}
