//! `tags-alphabetical`: the top-level tags array stays sorted by name.

use crate::diagnostic::Report;
use crate::rules::rule::{LintRule, RuleId};
use crate::walk::VisitorNode;

pub struct TagsAlphabetical;

impl LintRule for TagsAlphabetical {
    fn id(&self) -> RuleId {
        RuleId::new("tags-alphabetical")
    }

    fn description(&self) -> &str {
        "The root tags array must be alphabetically ordered."
    }

    fn visitor(&self) -> VisitorNode {
        VisitorNode::new().child(
            "Root",
            VisitorNode::on_enter(|node, ctx| {
                let Some(tags) = node.get("tags").and_then(|t| t.as_sequence()) else {
                    return;
                };
                for (index, pair) in tags.windows(2).enumerate() {
                    let (Some(a), Some(b)) =
                        (pair[0].str_field("name"), pair[1].str_field("name"))
                    else {
                        continue;
                    };
                    if a > b {
                        let location = ctx
                            .location()
                            .child("tags")
                            .child((index + 1).to_string());
                        ctx.report(
                            Report::new("The \"tags\" array should be in alphabetical order")
                                .with_location(location),
                        );
                    }
                }
            }),
        )
    }
}
