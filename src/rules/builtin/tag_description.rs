//! `tag-description`: every tag needs a description.

use crate::diagnostic::Report;
use crate::rules::rule::{LintRule, RuleId};
use crate::walk::VisitorNode;

pub struct TagDescription;

impl LintRule for TagDescription {
    fn id(&self) -> RuleId {
        RuleId::new("tag-description")
    }

    fn description(&self) -> &str {
        "Tag objects must carry a description."
    }

    fn visitor(&self) -> VisitorNode {
        VisitorNode::new().child(
            "Tag",
            VisitorNode::on_enter(|node, ctx| {
                let missing = node
                    .as_mapping()
                    .map_or(true, |m| m.get("description").is_none());
                if missing {
                    ctx.report(Report::new("Tag object description must be present.").on_key());
                }
            }),
        )
    }
}
