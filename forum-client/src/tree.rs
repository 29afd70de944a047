use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

use crate::api::{Comment, CommentId};

pub struct CommentNode {
    pub comment: Arc<Comment>,

    /// Replies, in the order they had in the input listing
    pub children: Vec<CommentNode>,
}

// Derived impls would recurse once per nesting level, so all of these walk
// the subtree with an explicit stack

impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Clone for CommentNode {
    fn clone(&self) -> CommentNode {
        // Pre-order, with the position of each node's parent
        let mut order: Vec<(&CommentNode, usize)> = Vec::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, parent)) = stack.pop() {
            let i = order.len();
            order.push((node, parent));
            stack.extend(node.children.iter().rev().map(|c| (c, i)));
        }

        // Backwards, every node is complete before its parent; siblings come
        // last one first
        let mut copies: Vec<Vec<CommentNode>> = order.iter().map(|_| Vec::new()).collect();
        for i in (1..order.len()).rev() {
            let (node, parent) = order[i];
            let mut children = std::mem::take(&mut copies[i]);
            children.reverse();
            copies[parent].push(CommentNode {
                comment: node.comment.clone(),
                children,
            });
        }
        let mut children = std::mem::take(&mut copies[0]);
        children.reverse();
        CommentNode {
            comment: self.comment.clone(),
            children,
        }
    }
}

impl PartialEq for CommentNode {
    fn eq(&self, other: &CommentNode) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.comment != b.comment || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

impl Eq for CommentNode {}

/// Flattened to `(depth, comment)` entries in pre-order
impl fmt::Debug for CommentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut stack = vec![(0, self)];
        while let Some((depth, node)) = stack.pop() {
            list.entry(&(depth, &node.comment));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        }
        list.finish()
    }
}

impl CommentNode {
    pub fn id(&self) -> CommentId {
        self.comment.id
    }

    /// Text to show for this comment, hiding the content of tombstones
    pub fn display_text(&self) -> &str {
        match self.comment.is_deleted {
            true => "[deleted]",
            false => self.comment.summary.as_str(),
        }
    }
}

/// Threaded view of a flat comment listing
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentTree {
    pub roots: Vec<CommentNode>,
}

impl CommentTree {
    /// Builds the reply forest of `comments`, keeping their relative order
    /// among siblings.
    ///
    /// A comment becomes a root when it has no parent, when its parent is not
    /// in the listing, or when it names itself as parent. On duplicate ids the
    /// last comment holding the id receives the replies. Comments only
    /// reachable through a reply cycle are promoted to roots after all other
    /// roots, in input order, so that every input comment appears exactly once.
    pub fn build<I>(comments: I) -> CommentTree
    where
        I: IntoIterator,
        I::Item: Into<Arc<Comment>>,
    {
        let comments = comments.into_iter().map(Into::into).collect::<Vec<_>>();
        let n = comments.len();

        let mut index = HashMap::with_capacity(n);
        for (i, c) in comments.iter().enumerate() {
            if index.insert(c.id, i).is_some() {
                tracing::warn!(id = ?c.id, "duplicate comment id in listing");
            }
        }

        let mut linker = Linker {
            children: vec![Vec::new(); n],
            kept: vec![Vec::new(); n],
            visited: vec![false; n],
            order: Vec::with_capacity(n),
            stack: Vec::new(),
        };
        let mut roots = Vec::new();
        for (i, c) in comments.iter().enumerate() {
            match c.parent_id.and_then(|p| index.get(&p).copied()) {
                Some(p) if p != i => linker.children[p].push(i),
                Some(_) => {
                    tracing::warn!(id = ?c.id, "comment is its own parent");
                    roots.push(i);
                }
                None => roots.push(i),
            }
        }

        for &r in roots.iter() {
            linker.attach_from(r);
        }
        if linker.order.len() < n {
            for i in 0..n {
                if !linker.visited[i] {
                    tracing::warn!(id = ?comments[i].id, "reply cycle in listing");
                    roots.push(i);
                    linker.attach_from(i);
                }
            }
        }

        // Pre-order reversed puts every descendant before its ancestors
        let mut built: Vec<Option<CommentNode>> = (0..n).map(|_| None).collect();
        for &i in linker.order.iter().rev() {
            let children = linker.kept[i]
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            built[i] = Some(CommentNode {
                comment: comments[i].clone(),
                children,
            });
        }
        CommentTree {
            roots: roots.iter().filter_map(|&r| built[r].take()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of comments in the tree
    pub fn len(&self) -> usize {
        self.walk(&CollapseState::default()).count()
    }

    pub fn find(&self, id: CommentId) -> Option<&CommentNode> {
        self.walk(&CollapseState::default())
            .map(|(_, node)| node)
            .find(|node| node.id() == id)
    }

    /// Depth-first rendering order with the depth of each node, not
    /// descending into collapsed comments
    pub fn walk<'t, 'c>(&'t self, collapsed: &'c CollapseState) -> Walk<'t, 'c> {
        Walk {
            stack: self.roots.iter().rev().map(|n| (0, n)).collect(),
            collapsed,
        }
    }
}

struct Linker {
    /// Replies of each comment per its `parent_id`
    children: Vec<Vec<usize>>,

    /// Replies actually placed under each comment
    kept: Vec<Vec<usize>>,

    visited: Vec<bool>,
    order: Vec<usize>,
    stack: Vec<(Option<usize>, usize)>,
}

impl Linker {
    fn attach_from(&mut self, root: usize) {
        self.stack.push((None, root));
        while let Some((parent, i)) = self.stack.pop() {
            if self.visited[i] {
                continue;
            }
            self.visited[i] = true;
            self.order.push(i);
            if let Some(p) = parent {
                self.kept[p].push(i);
            }
            for &c in self.children[i].iter().rev() {
                if !self.visited[c] {
                    self.stack.push((Some(i), c));
                }
            }
        }
    }
}

pub struct Walk<'t, 'c> {
    stack: Vec<(usize, &'t CommentNode)>,
    collapsed: &'c CollapseState,
}

impl<'t, 'c> Iterator for Walk<'t, 'c> {
    type Item = (usize, &'t CommentNode);

    fn next(&mut self) -> Option<(usize, &'t CommentNode)> {
        let (depth, node) = self.stack.pop()?;
        if !self.collapsed.is_collapsed(node.id()) {
            self.stack
                .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        }
        Some((depth, node))
    }
}

/// Which comments have their replies hidden; owned by the view, not the tree
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CollapseState(HashSet<CommentId>);

impl CollapseState {
    pub fn is_collapsed(&self, id: CommentId) -> bool {
        self.0.contains(&id)
    }

    /// Returns whether the comment is now collapsed
    pub fn toggle(&mut self, id: CommentId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn collapse(&mut self, id: CommentId) {
        self.0.insert(id);
    }

    pub fn expand(&mut self, id: CommentId) {
        self.0.remove(&id);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Label of the show/hide replies toggle. Uses the server's reply count,
/// which may exceed the replies present in a partial listing.
pub fn replies_label(no_of_replies: i64, collapsed: bool) -> Option<String> {
    if no_of_replies <= 0 {
        return None;
    }
    Some(match collapsed {
        true => format!(
            "Show {no_of_replies} {}",
            match no_of_replies {
                1 => "reply",
                _ => "replies",
            }
        ),
        false => String::from("Hide replies"),
    })
}
