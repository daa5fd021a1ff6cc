//! Type-driven document traversal.
//!
//! [`walk`] runs a strict depth-first traversal of a document, guided by a
//! [`TypeSchema`](crate::types::TypeSchema): children are visited in the
//! order their slots are declared, enter listeners fire pre-order and leave
//! listeners post-order. Reference nodes in referenceable slots are
//! substituted transparently through the [`RefRegistry`]; listeners see the
//! target as if it were written inline, once per occurrence. The only brake
//! on re-visiting is a per-path guard over the locations currently being
//! walked, which turns reference cycles into silent pruning.
//!
//! When several listeners for one type match a node, the deepest ancestor
//! chain wins and the rest stay silent for that occurrence; ties at the
//! winning depth all fire, in registration order.

mod compose;
mod context;
mod visitor;

pub use compose::{compose, Dispatch, ANY};
pub use context::{Context, Resolved};
pub use visitor::{EnterFn, LeaveFn, RefFn, RuleVisitor, SkipFn, VisitorNode};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::diagnostic::Diagnostic;
use crate::error::{ApivetError, Result};
use crate::model::{Document, Location, Node};
use crate::resolve::RefRegistry;
use crate::types::{ChildSlot, TypeSchema, TypeShape};

use compose::TypeCandidate;

/// Walk `document` with the composed `dispatch`, treating the root node as
/// `root_type`. Diagnostics come back in traversal order.
pub fn walk(
    document: &Arc<Document>,
    schema: &TypeSchema,
    dispatch: &Dispatch,
    registry: &RefRegistry,
    root_type: &str,
) -> Result<Vec<Diagnostic>> {
    if !schema.contains(root_type) {
        return Err(ApivetError::UnknownType {
            name: root_type.to_string(),
        });
    }
    let walker = Walker {
        schema,
        dispatch,
        registry,
    };
    let mut state = WalkState::default();
    let location = Location::root(document.source().clone());
    walker.visit(&mut state, document.root(), root_type, &location);
    Ok(state.out)
}

struct Walker<'a> {
    schema: &'a TypeSchema,
    dispatch: &'a Dispatch,
    registry: &'a RefRegistry,
}

/// One ancestor on the current path.
struct Frame {
    type_name: String,
    node: Node,
}

#[derive(Default)]
struct WalkState {
    stack: Vec<Frame>,
    /// Locations of reference targets currently being walked on this path.
    open: Vec<Location>,
    out: Vec<Diagnostic>,
}

impl Walker<'_> {
    fn visit(&self, state: &mut WalkState, node: &Node, type_name: &str, location: &Location) {
        trace!(type_name, location = %location, "visiting");
        let matched: Vec<&TypeCandidate> = self
            .dispatch
            .by_type
            .get(type_name)
            .map(|candidates| {
                candidates
                    .iter()
                    .filter(|c| chain_matches(&c.chain, &state.stack))
                    .collect()
            })
            .unwrap_or_default();
        let parents = snapshot_parents(&state.stack);

        // A skip from any rule prunes the subtree for the whole run.
        for candidate in &matched {
            if let Some(skip) = &candidate.skip {
                let ctx = Context {
                    type_name,
                    location,
                    parents: &parents,
                    registry: self.registry,
                    rule_id: &candidate.rule_id,
                    severity: candidate.severity,
                    out: &mut state.out,
                };
                if skip(node, &ctx) {
                    return;
                }
            }
        }

        // Specificity: only listeners at the deepest matching chain fire for
        // this occurrence. Skip-only candidates do not compete.
        let winning_depth = matched
            .iter()
            .filter(|c| c.has_listener())
            .map(|c| c.depth)
            .max();
        let winners: Vec<&&TypeCandidate> = matched
            .iter()
            .filter(|c| c.has_listener() && Some(c.depth) == winning_depth)
            .collect();

        for any in &self.dispatch.any {
            if let Some(enter) = &any.enter {
                let mut ctx = Context {
                    type_name,
                    location,
                    parents: &parents,
                    registry: self.registry,
                    rule_id: &any.rule_id,
                    severity: any.severity,
                    out: &mut state.out,
                };
                enter(node, &mut ctx);
            }
        }
        for candidate in &winners {
            if let Some(enter) = &candidate.enter {
                let mut ctx = Context {
                    type_name,
                    location,
                    parents: &parents,
                    registry: self.registry,
                    rule_id: &candidate.rule_id,
                    severity: candidate.severity,
                    out: &mut state.out,
                };
                enter(node, &mut ctx);
            }
        }

        state.stack.push(Frame {
            type_name: type_name.to_string(),
            node: node.clone(),
        });
        self.visit_children(state, node, type_name, location);
        state.stack.pop();

        // Wildcards lead in both phases.
        for any in &self.dispatch.any {
            if let Some(leave) = &any.leave {
                let mut ctx = Context {
                    type_name,
                    location,
                    parents: &parents,
                    registry: self.registry,
                    rule_id: &any.rule_id,
                    severity: any.severity,
                    out: &mut state.out,
                };
                leave(node, &mut ctx);
            }
        }
        for candidate in &winners {
            if let Some(leave) = &candidate.leave {
                let mut ctx = Context {
                    type_name,
                    location,
                    parents: &parents,
                    registry: self.registry,
                    rule_id: &candidate.rule_id,
                    severity: candidate.severity,
                    out: &mut state.out,
                };
                leave(node, &mut ctx);
            }
        }
    }

    /// Recurse into declared child slots, in declaration order. Content that
    /// does not match the declared shape has no children to visit.
    fn visit_children(
        &self,
        state: &mut WalkState,
        node: &Node,
        type_name: &str,
        location: &Location,
    ) {
        let Some(def) = self.schema.get(type_name) else {
            return;
        };
        match def.shape() {
            TypeShape::Object { properties } => {
                let Some(mapping) = node.as_mapping() else {
                    return;
                };
                for prop in properties {
                    if let Some(child) = mapping.get(&prop.name) {
                        self.descend(state, child, &prop.slot, location.child(prop.name.as_str()));
                    }
                }
            }
            TypeShape::Map { value } => {
                let Some(mapping) = node.as_mapping() else {
                    return;
                };
                for entry in mapping.entries() {
                    self.descend(state, &entry.value, value, location.child(entry.key.as_str()));
                }
            }
            TypeShape::List { item } => {
                let Some(items) = node.as_sequence() else {
                    return;
                };
                for (index, child) in items.iter().enumerate() {
                    self.descend(state, child, item, location.child(index.to_string()));
                }
            }
        }
    }

    /// Visit one child slot. Reference nodes are observed first, then the
    /// target is walked in place of the reference, unless its location is
    /// already open on this path.
    fn descend(&self, state: &mut WalkState, node: &Node, slot: &ChildSlot, location: Location) {
        if slot.referenceable && node.is_ref() {
            let entry = self.registry.resolve_node(node);
            self.observe_ref(state, node, slot, &location, entry);
            if let Some(type_name) = &slot.type_name {
                if let Some(entry) = entry {
                    let target_location = entry.location.clone();
                    if state.open.contains(&target_location) {
                        trace!(location = %target_location, "reference cycle, pruning");
                        return;
                    }
                    let target = entry.node.clone();
                    state.open.push(target_location.clone());
                    self.visit(state, &target, type_name, &target_location);
                    state.open.pop();
                }
            }
            return;
        }
        if let Some(type_name) = &slot.type_name {
            self.visit(state, node, type_name, &location);
        }
    }

    /// Fire reference observers whose scope matches the current path. The
    /// context reports the slot's declared type, or `ref` for scalar slots.
    fn observe_ref(
        &self,
        state: &mut WalkState,
        node: &Node,
        slot: &ChildSlot,
        location: &Location,
        entry: Option<&crate::resolve::ResolvedRef>,
    ) {
        let type_name = slot.type_name.as_deref().unwrap_or("ref");
        let parents = snapshot_parents(&state.stack);
        for candidate in &self.dispatch.refs {
            if !chain_matches(&candidate.chain, &state.stack) {
                continue;
            }
            let mut ctx = Context {
                type_name,
                location,
                parents: &parents,
                registry: self.registry,
                rule_id: &candidate.rule_id,
                severity: candidate.severity,
                out: &mut state.out,
            };
            (candidate.observer)(node, &mut ctx, entry);
        }
    }
}

/// A chain matches when its names appear in order within the ancestor stack,
/// not necessarily adjacent.
fn chain_matches(chain: &[String], stack: &[Frame]) -> bool {
    let mut next = 0;
    for frame in stack {
        if next == chain.len() {
            break;
        }
        if frame.type_name == chain[next] {
            next += 1;
        }
    }
    next == chain.len()
}

/// Nearest ancestor per type name; later frames shadow earlier ones.
fn snapshot_parents(stack: &[Frame]) -> HashMap<String, Node> {
    let mut parents = HashMap::new();
    for frame in stack {
        parents.insert(frame.type_name.clone(), frame.node.clone());
    }
    parents
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::diagnostic::Severity;
    use crate::loader::FsLoader;
    use crate::model::parse_document;
    use crate::resolve::resolve_document;
    use crate::types::oas3;

    fn run(yaml: &str, rules: Vec<RuleVisitor>) -> Vec<Diagnostic> {
        let document = parse_document("foobar.yaml", yaml).unwrap();
        let schema = oas3::schema();
        let registry = resolve_document(&document, &FsLoader::new(), &schema, oas3::ROOT).unwrap();
        let dispatch = compose(rules, &schema).unwrap();
        walk(&document, &schema, &dispatch, &registry, oas3::ROOT).unwrap()
    }

    type Log = Rc<RefCell<Vec<String>>>;

    #[test]
    fn enters_and_leaves_nest_in_document_order() {
        let yaml = "openapi: 3.0.0\n\
                    paths:\n\
                    \x20 /pet:\n\
                    \x20   get:\n\
                    \x20     operationId: getPet\n";
        let events: Log = Rc::default();
        let enter_log = Rc::clone(&events);
        let leave_log = Rc::clone(&events);
        let rule = RuleVisitor::new(
            "order",
            Severity::Error,
            VisitorNode::new().child(
                ANY,
                VisitorNode::new()
                    .enter(move |_, ctx: &mut Context<'_>| {
                        enter_log
                            .borrow_mut()
                            .push(format!("enter {} {}", ctx.type_name(), ctx.location()));
                    })
                    .leave(move |_, ctx: &mut Context<'_>| {
                        leave_log
                            .borrow_mut()
                            .push(format!("leave {} {}", ctx.type_name(), ctx.location()));
                    }),
            ),
        );
        run(yaml, vec![rule]);

        assert_eq!(
            *events.borrow(),
            [
                "enter Root foobar.yaml#/",
                "enter PathMap foobar.yaml#/paths",
                "enter PathItem foobar.yaml#/paths/~1pet",
                "enter Operation foobar.yaml#/paths/~1pet/get",
                "leave Operation foobar.yaml#/paths/~1pet/get",
                "leave PathItem foobar.yaml#/paths/~1pet",
                "leave PathMap foobar.yaml#/paths",
                "leave Root foobar.yaml#/",
            ]
        );
    }

    #[test]
    fn deepest_matching_listener_wins() {
        let yaml = "openapi: 3.0.0\n\
                    paths:\n\
                    \x20 /pet:\n\
                    \x20   get:\n\
                    \x20     operationId: getPet\n";
        let events: Log = Rc::default();
        let top = Rc::clone(&events);
        let nested = Rc::clone(&events);
        let rule = RuleVisitor::new(
            "specificity",
            Severity::Error,
            VisitorNode::new()
                .child(
                    "Operation",
                    VisitorNode::on_enter(move |_, _: &mut Context<'_>| {
                        top.borrow_mut().push("top".to_string());
                    }),
                )
                .child(
                    "PathItem",
                    VisitorNode::new().child(
                        "Operation",
                        VisitorNode::on_enter(move |_, _: &mut Context<'_>| {
                            nested.borrow_mut().push("nested".to_string());
                        }),
                    ),
                ),
        );
        run(yaml, vec![rule]);
        assert_eq!(*events.borrow(), ["nested"]);
    }

    #[test]
    fn skip_prunes_for_every_rule() {
        let yaml = "openapi: 3.0.0\n\
                    paths:\n\
                    \x20 /keep:\n\
                    \x20   get:\n\
                    \x20     operationId: keepGet\n\
                    \x20 /skip:\n\
                    \x20   get:\n\
                    \x20     operationId: skipGet\n";
        let events: Log = Rc::default();
        let seen = Rc::clone(&events);
        let skipper = RuleVisitor::new(
            "skipper",
            Severity::Error,
            VisitorNode::new().child(
                "PathItem",
                VisitorNode::new().skip(|_, ctx: &Context<'_>| {
                    ctx.location().fragment().ends_with("~1skip")
                }),
            ),
        );
        let observer = RuleVisitor::new(
            "observer",
            Severity::Error,
            VisitorNode::new().child(
                "Operation",
                VisitorNode::on_enter(move |node: &Node, _: &mut Context<'_>| {
                    let id = node.str_field("operationId").unwrap_or_default().to_string();
                    seen.borrow_mut().push(id);
                }),
            ),
        );
        run(yaml, vec![skipper, observer]);
        assert_eq!(*events.borrow(), ["keepGet"]);
    }

    #[test]
    fn reference_cycles_prune_per_path() {
        let yaml = "openapi: 3.0.0\n\
                    paths:\n\
                    \x20 /pet:\n\
                    \x20   get:\n\
                    \x20     parameters:\n\
                    \x20       - name: a\n\
                    \x20         schema:\n\
                    \x20           $ref: '#/components/schemas/Loop'\n\
                    components:\n\
                    \x20 schemas:\n\
                    \x20   Loop:\n\
                    \x20     type: object\n\
                    \x20     properties:\n\
                    \x20       self:\n\
                    \x20         $ref: '#/components/schemas/Loop'\n";
        let events: Log = Rc::default();
        let seen = Rc::clone(&events);
        let rule = RuleVisitor::new(
            "schemas",
            Severity::Error,
            VisitorNode::new().child(
                "Schema",
                VisitorNode::on_enter(move |_, ctx: &mut Context<'_>| {
                    seen.borrow_mut().push(ctx.location().fragment());
                }),
            ),
        );
        run(yaml, vec![rule]);

        // Once through the parameter's reference, once inline under
        // components, once through the inline occurrence's own self
        // reference. The guard stops each path, not the whole run.
        assert_eq!(
            *events.borrow(),
            [
                "#/components/schemas/Loop",
                "#/components/schemas/Loop",
                "#/components/schemas/Loop",
            ]
        );
    }
}
