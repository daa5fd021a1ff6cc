//! `server-trailing-slash`: server URLs must not end with a slash.
//!
//! A trailing slash combines badly with path templates that start with one;
//! `https://api.example/` plus `/pets` yields a double slash.

use crate::diagnostic::Report;
use crate::rules::rule::{LintRule, RuleId};
use crate::walk::VisitorNode;

pub struct ServerTrailingSlash;

impl LintRule for ServerTrailingSlash {
    fn id(&self) -> RuleId {
        RuleId::new("server-trailing-slash")
    }

    fn description(&self) -> &str {
        "Server URLs must not end with a trailing slash."
    }

    fn visitor(&self) -> VisitorNode {
        VisitorNode::new().child(
            "Server",
            VisitorNode::on_enter(|node, ctx| {
                let Some(url) = node.str_field("url") else {
                    return;
                };
                // A lone "/" is a legitimate relative server URL.
                if url.len() > 1 && url.ends_with('/') {
                    ctx.report(
                        Report::new("Server URL should not have a trailing slash.")
                            .with_location(ctx.location().child("url")),
                    );
                }
            }),
        )
    }
}
