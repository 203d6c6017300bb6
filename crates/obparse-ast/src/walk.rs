//! Tree traversal with a sparse, rule-kind indexed callback table.
//!
//! The walk is pre-order depth-first: a node's enter callback fires before any
//! of its children are visited, its exit callback after the last child has
//! exited. Any callback may stop the walk; nothing else is visited afterwards
//! and the caller gets `WalkOutcome::Truncated`.
//!
//! The walker keeps an explicit stack, so tree depth is bounded by memory
//! rather than by the native call stack. Trees are never mutated, so any
//! number of walks may run over the same tree on different threads.

use crate::{ParseChild, ParseNode, RuleKind, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    Stop,
}

impl WalkControl {
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Truncated,
}

impl WalkOutcome {
    #[must_use]
    pub const fn is_truncated(self) -> bool {
        matches!(self, Self::Truncated)
    }
}

type NodeCallback<'a, S> = Box<dyn FnMut(&ParseNode, &mut S) -> WalkControl + 'a>;
type TokenCallback<'a, S> = Box<dyn FnMut(&Token, &mut S) -> WalkControl + 'a>;

/// Optional enter/exit callbacks keyed by rule kind, plus wildcard and token hooks.
///
/// For one node the firing order is: wildcard enter, kind enter, children,
/// kind exit, wildcard exit.
pub struct ListenerTable<'a, S> {
    enter: Vec<Option<NodeCallback<'a, S>>>,
    exit: Vec<Option<NodeCallback<'a, S>>>,
    enter_any: Option<NodeCallback<'a, S>>,
    exit_any: Option<NodeCallback<'a, S>>,
    token: Option<TokenCallback<'a, S>>,
}

impl<'a, S> ListenerTable<'a, S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            enter: std::iter::repeat_with(|| None).take(RuleKind::COUNT).collect(),
            exit: std::iter::repeat_with(|| None).take(RuleKind::COUNT).collect(),
            enter_any: None,
            exit_any: None,
            token: None,
        }
    }

    #[must_use]
    pub fn on_enter(
        mut self,
        kind: RuleKind,
        f: impl FnMut(&ParseNode, &mut S) -> WalkControl + 'a,
    ) -> Self {
        self.enter[kind.index()] = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_exit(
        mut self,
        kind: RuleKind,
        f: impl FnMut(&ParseNode, &mut S) -> WalkControl + 'a,
    ) -> Self {
        self.exit[kind.index()] = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_enter_any(mut self, f: impl FnMut(&ParseNode, &mut S) -> WalkControl + 'a) -> Self {
        self.enter_any = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_exit_any(mut self, f: impl FnMut(&ParseNode, &mut S) -> WalkControl + 'a) -> Self {
        self.exit_any = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_token(mut self, f: impl FnMut(&Token, &mut S) -> WalkControl + 'a) -> Self {
        self.token = Some(Box::new(f));
        self
    }

    /// Number of per-kind callbacks registered.
    #[must_use]
    pub fn registered(&self) -> usize {
        self.enter.iter().chain(&self.exit).filter(|c| c.is_some()).count()
    }

    fn fire_enter(&mut self, node: &ParseNode, state: &mut S) -> WalkControl {
        if let Some(f) = self.enter_any.as_mut() {
            if f(node, state).is_stop() {
                return WalkControl::Stop;
            }
        }
        match self.enter[node.kind().index()].as_mut() {
            Some(f) => f(node, state),
            None => WalkControl::Continue,
        }
    }

    fn fire_exit(&mut self, node: &ParseNode, state: &mut S) -> WalkControl {
        if let Some(f) = self.exit[node.kind().index()].as_mut() {
            if f(node, state).is_stop() {
                return WalkControl::Stop;
            }
        }
        match self.exit_any.as_mut() {
            Some(f) => f(node, state),
            None => WalkControl::Continue,
        }
    }
}

impl<S> Default for ListenerTable<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

enum Frame<'t> {
    Enter(&'t ParseNode),
    Exit(&'t ParseNode),
    Token(&'t Token),
}

/// Walk `root` pre-order, firing the callbacks registered in `table`.
pub fn walk<S>(root: &ParseNode, table: &mut ListenerTable<'_, S>, state: &mut S) -> WalkOutcome {
    let visit_tokens = table.token.is_some();
    let mut stack = vec![Frame::Enter(root)];
    while let Some(frame) = stack.pop() {
        let control = match frame {
            Frame::Enter(node) => {
                let control = table.fire_enter(node, state);
                stack.push(Frame::Exit(node));
                for child in node.children().iter().rev() {
                    match child {
                        ParseChild::Node(n) => stack.push(Frame::Enter(n)),
                        ParseChild::Token(t) if visit_tokens => stack.push(Frame::Token(t)),
                        ParseChild::Token(_) => {}
                    }
                }
                control
            }
            Frame::Exit(node) => table.fire_exit(node, state),
            Frame::Token(tok) => match table.token.as_mut() {
                Some(f) => f(tok, state),
                None => WalkControl::Continue,
            },
        };
        if control.is_stop() {
            return WalkOutcome::Truncated;
        }
    }
    WalkOutcome::Completed
}

#[cfg(test)]
mod tests {
    use obparse_types::{DialectMode, Span};

    use super::*;
    use crate::TokenKind;

    fn leaf(kind: RuleKind, text: &str, at: u32) -> ParseNode {
        ParseNode::new(
            kind,
            vec![ParseChild::Token(Token {
                kind: TokenKind::Ident,
                text: text.to_owned(),
                span: Span::new(at, at + text.len() as u32),
                line: 1,
                col: at + 1,
                mode: DialectMode::MySqlCompatible,
            })],
        )
    }

    // (a) (b (c))
    fn tree() -> ParseNode {
        let inner = ParseNode::new(
            RuleKind::ParenExpr,
            vec![ParseChild::Node(leaf(RuleKind::ColumnRef, "c", 4))],
        );
        let b = ParseNode::new(
            RuleKind::ExprList,
            vec![
                ParseChild::Node(leaf(RuleKind::ColumnRef, "b", 2)),
                ParseChild::Node(inner),
            ],
        );
        ParseNode::new(
            RuleKind::ExprList,
            vec![
                ParseChild::Node(leaf(RuleKind::ColumnRef, "a", 0)),
                ParseChild::Node(b),
            ],
        )
    }

    #[test]
    fn enter_and_exit_fire_once_per_node_in_order() {
        let root = tree();
        let mut table = ListenerTable::new()
            .on_enter_any(|n, log: &mut Vec<String>| {
                log.push(format!("+{}", n.kind()));
                WalkControl::Continue
            })
            .on_exit_any(|n, log: &mut Vec<String>| {
                log.push(format!("-{}", n.kind()));
                WalkControl::Continue
            });
        let mut log = Vec::new();
        assert_eq!(walk(&root, &mut table, &mut log), WalkOutcome::Completed);
        assert_eq!(
            log,
            vec![
                "+expr_list",
                "+column_ref",
                "-column_ref",
                "+expr_list",
                "+column_ref",
                "-column_ref",
                "+paren_expr",
                "+column_ref",
                "-column_ref",
                "-paren_expr",
                "-expr_list",
                "-expr_list",
            ]
        );
        assert_eq!(log.len(), 2 * root.node_count());
    }

    #[test]
    fn per_kind_callbacks_only_see_their_kind() {
        let root = tree();
        let mut table = ListenerTable::new().on_enter(RuleKind::ColumnRef, |n, seen: &mut Vec<String>| {
            seen.push(n.tokens()[0].text.clone());
            WalkControl::Continue
        });
        assert_eq!(table.registered(), 1);
        let mut seen = Vec::new();
        walk(&root, &mut table, &mut seen);
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn stop_truncates_immediately() {
        let root = tree();
        let mut table = ListenerTable::new()
            .on_enter(RuleKind::ColumnRef, |n, seen: &mut Vec<String>| {
                seen.push(n.tokens()[0].text.clone());
                if n.tokens()[0].text == "b" {
                    WalkControl::Stop
                } else {
                    WalkControl::Continue
                }
            })
            .on_exit(RuleKind::ExprList, |_, seen: &mut Vec<String>| {
                seen.push("exit".to_owned());
                WalkControl::Continue
            });
        let mut seen = Vec::new();
        assert!(walk(&root, &mut table, &mut seen).is_truncated());
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn token_callback_sees_leaves_in_order() {
        let root = tree();
        let mut table = ListenerTable::new().on_token(|t, out: &mut String| {
            out.push_str(&t.text);
            WalkControl::Continue
        });
        let mut out = String::new();
        walk(&root, &mut table, &mut out);
        assert_eq!(out, "abc");
    }

    #[test]
    fn concurrent_walks_share_one_tree() {
        let root = tree();
        let counts: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut table = ListenerTable::new().on_enter_any(|_, n: &mut usize| {
                            *n += 1;
                            WalkControl::Continue
                        });
                        let mut n = 0;
                        walk(&root, &mut table, &mut n);
                        n
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(counts, vec![root.node_count(); 4]);
    }
}
