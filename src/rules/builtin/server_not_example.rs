//! `server-not-example`: servers must not point at placeholder hosts.

use crate::diagnostic::Report;
use crate::rules::rule::{LintRule, RuleId};
use crate::walk::VisitorNode;

pub struct ServerNotExample;

impl LintRule for ServerNotExample {
    fn id(&self) -> RuleId {
        RuleId::new("server-not-example")
    }

    fn description(&self) -> &str {
        "Server URLs must not point at example.com."
    }

    fn visitor(&self) -> VisitorNode {
        VisitorNode::new().child(
            "Server",
            VisitorNode::on_enter(|node, ctx| {
                let Some(url) = node.str_field("url") else {
                    return;
                };
                if url.contains("example.com") {
                    ctx.report(
                        Report::new("Server URL should not point at example.com.")
                            .with_location(ctx.location().child("url")),
                    );
                }
            }),
        )
    }
}
