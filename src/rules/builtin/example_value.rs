//! `example-value-or-external-value`: an example carries one kind of value.

use crate::diagnostic::Report;
use crate::rules::rule::{LintRule, RuleId};
use crate::walk::VisitorNode;

pub struct ExampleValueOrExternalValue;

impl LintRule for ExampleValueOrExternalValue {
    fn id(&self) -> RuleId {
        RuleId::new("example-value-or-external-value")
    }

    fn description(&self) -> &str {
        "Example objects must not mix inline and external values."
    }

    fn visitor(&self) -> VisitorNode {
        VisitorNode::new().child(
            "Example",
            VisitorNode::on_enter(|node, ctx| {
                if node.get("value").is_some() && node.get("externalValue").is_some() {
                    ctx.report(
                        Report::new(
                            "Example object can have either \"value\" or \"externalValue\" fields.",
                        )
                        .with_location(ctx.location().child("value"))
                        .on_key(),
                    );
                }
            }),
        )
    }
}
