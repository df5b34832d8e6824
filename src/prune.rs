//! Bounding description trees to a size and depth budget.
//!
//! Pruning walks a tree top-down and spends a [`Budget`] on the conditions it
//! keeps. Conditions that do not fit are replaced by `Thing` (which costs
//! nothing) and their query syntax is appended to a log, so the caller can
//! report what was dropped. The input tree is never modified.
//!
//! Size budget is shared: all children of a container draw from the same
//! counter, in order. Depth budget is per branch: each child of a container
//! starts from the container's remaining depth, and the container reports the
//! smallest depth left over by any child.

use tracing::debug;

use crate::ast::{Description, DescriptionKind};

/// Remaining size and depth a pruned tree may still use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub size: usize,
    pub depth: usize,
}

impl Budget {
    pub fn new(size: usize, depth: usize) -> Self {
        Budget { size, depth }
    }

    /// The exact budget a description needs to survive pruning untouched.
    pub fn of(description: &Description) -> Self {
        Budget::new(description.size(), description.depth())
    }
}

impl Description {
    /// Restrict this tree to `budget`.
    ///
    /// Returns the replacement tree and the budget left after it. Every
    /// fragment that had to be dropped is appended to `log` in query syntax,
    /// in the order the fragments were dropped.
    pub fn prune(&self, budget: Budget, log: &mut Vec<String>) -> (Description, Budget) {
        match self.kind() {
            DescriptionKind::Thing => (self.clone(), budget),
            DescriptionKind::Value(_)
            | DescriptionKind::Namespace(_)
            | DescriptionKind::Concept(_) => {
                let (size, depth) = (self.size(), self.depth());
                if size > budget.size || depth > budget.depth {
                    (self.drop_into(log), budget)
                } else {
                    let left = Budget::new(budget.size - size, budget.depth - depth);
                    (self.clone(), left)
                }
            }
            DescriptionKind::Class(class) => {
                let size = self.size();
                if size <= budget.size {
                    (self.clone(), Budget::new(budget.size - size, budget.depth))
                } else if budget.size == 0 {
                    (self.drop_into(log), budget)
                } else {
                    let (kept, rest) = class.split_at(budget.size);
                    let rest = Description::from(rest);
                    debug!(fragment = %rest, "pruned categories");
                    log.push(rest.to_string());
                    let kept = Description::from(kept).with_print_requests(self.print_requests());
                    (kept, Budget::new(0, budget.depth))
                }
            }
            DescriptionKind::SomeProperty(some) => {
                if budget.size == 0 || budget.depth == 0 {
                    return (self.drop_into(log), budget);
                }
                let inner = Budget::new(budget.size - 1, budget.depth - 1);
                let (description, left) = some.description.prune(inner, log);
                let pruned = Description::some_property(some.property.clone(), description)
                    .with_print_requests(self.print_requests());
                (pruned, left)
            }
            DescriptionKind::Conjunction(conjunction) => {
                self.prune_container(conjunction.children(), budget, log, Description::conjunction)
            }
            DescriptionKind::Disjunction(disjunction) => {
                self.prune_container(disjunction.children(), budget, log, Description::disjunction)
            }
        }
    }

    fn prune_container(
        &self,
        children: &[Description],
        budget: Budget,
        log: &mut Vec<String>,
        rebuild: fn(Vec<Description>) -> Description,
    ) -> (Description, Budget) {
        // empty or trivially true containers already behave like Thing
        if children.is_empty() {
            return (self.clone(), budget);
        }
        if budget.size == 0 {
            return (self.drop_into(log), budget);
        }

        let mut dropped = Vec::new();
        let mut size = budget.size;
        let mut depth = budget.depth;
        let mut pruned = Vec::with_capacity(children.len());

        for child in children {
            let (description, left) = child.prune(Budget::new(size, budget.depth), &mut dropped);
            size = left.size;
            depth = depth.min(left.depth);
            pruned.push(description);
        }

        let rebuilt = rebuild(pruned);
        match rebuilt.child_count() {
            0 => (self.drop_into(log), Budget::new(size, budget.depth)),
            1 => {
                log.append(&mut dropped);
                let single = rebuilt
                    .into_children()
                    .into_iter()
                    .next()
                    .unwrap_or_else(Description::thing);
                (single.with_print_requests(self.print_requests()), Budget::new(size, depth))
            }
            _ => {
                log.append(&mut dropped);
                (rebuilt.with_print_requests(self.print_requests()), Budget::new(size, depth))
            }
        }
    }

    /// Replace with `Thing`, logging the whole condition.
    fn drop_into(&self, log: &mut Vec<String>) -> Description {
        let fragment = self.to_string();
        debug!(fragment = %fragment, "pruned description");
        log.push(fragment);
        Description::thing().with_print_requests(self.print_requests())
    }
}
