// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-owner selection state
//!
//! The selected element is one optional identity. Tree clicks and viewport
//! picks both go through [`SelectionSynchronizer`], which keeps the tree
//! highlight in step and notifies subscribers of every change.

use stb_lite_inspect::TreeNode;
use stb_lite_model::ElementRef;

/// Where a selection change came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    Tree,
    Viewport,
    /// Model load or clear
    Reset,
}

/// Selection before and after one update
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChange {
    pub previous: Option<ElementRef>,
    pub current: Option<ElementRef>,
    pub source: SelectionSource,
}

type Subscriber = Box<dyn FnMut(&SelectionChange)>;

/// Owns the current selection and its subscribers
#[derive(Default)]
pub struct SelectionSynchronizer {
    current: Option<ElementRef>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for SelectionSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSynchronizer")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SelectionSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run after every selection update
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SelectionChange) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn selected(&self) -> Option<&ElementRef> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, element: &ElementRef) -> bool {
        self.current.as_ref() == Some(element)
    }

    /// A tree node was clicked
    ///
    /// The node at `path` is highlighted. The selection only changes when the
    /// node shows an element; grouping nodes leave it as it was.
    pub fn select_from_tree(
        &mut self,
        tree: &mut TreeNode,
        path: &[usize],
    ) -> Option<SelectionChange> {
        let element = tree.node_at(path)?.element.clone();
        tree.set_highlight(Some(path));
        let element = element?;
        Some(self.update(Some(element), SelectionSource::Tree))
    }

    /// A viewport pick finished with `winner`, or with nothing
    ///
    /// The tree highlight follows: the winner's node, or no node on a miss.
    pub fn select_from_viewport(
        &mut self,
        tree: &mut TreeNode,
        winner: Option<ElementRef>,
    ) -> SelectionChange {
        let path = winner.as_ref().and_then(|element| tree.find_path(element));
        tree.set_highlight(path.as_deref());
        self.update(winner, SelectionSource::Viewport)
    }

    /// Drop the selection
    pub fn clear(&mut self) -> SelectionChange {
        self.update(None, SelectionSource::Reset)
    }

    fn update(&mut self, current: Option<ElementRef>, source: SelectionSource) -> SelectionChange {
        let previous = std::mem::replace(&mut self.current, current.clone());
        let change = SelectionChange {
            previous,
            current,
            source,
        };
        log::debug!("Selection {:?} -> {:?} ({:?})", change.previous, change.current, source);
        for subscriber in &mut self.subscribers {
            subscriber(&change);
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use stb_lite_model::ElementKind;

    fn leaf(name: &str, element: ElementRef) -> TreeNode {
        TreeNode {
            name: name.into(),
            element: Some(element),
            ..Default::default()
        }
    }

    /// Root with a "StbColumns" group holding two columns
    fn tree() -> TreeNode {
        TreeNode {
            name: "ST_BRIDGE".into(),
            children: vec![TreeNode {
                name: "StbColumns".into(),
                children: vec![
                    leaf("StbColumn (id: 1)", ElementRef::new(ElementKind::Column, "1")),
                    leaf("StbColumn (id: 2)", ElementRef::new(ElementKind::Column, "2")),
                ],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn highlighted(tree: &TreeNode) -> Vec<&str> {
        tree.iter()
            .filter(|n| n.highlighted)
            .map(|n| n.name.as_str())
            .collect()
    }

    #[test]
    fn test_tree_selection() {
        let mut tree = tree();
        let mut selection = SelectionSynchronizer::new();

        let change = selection.select_from_tree(&mut tree, &[0, 1]).unwrap();
        assert_eq!(change.current, Some(ElementRef::new(ElementKind::Column, "2")));
        assert_eq!(change.source, SelectionSource::Tree);
        assert!(selection.is_selected(&ElementRef::new(ElementKind::Column, "2")));
        assert_eq!(highlighted(&tree), vec!["StbColumn (id: 2)"]);
    }

    #[test]
    fn test_group_node_keeps_selection() {
        let mut tree = tree();
        let mut selection = SelectionSynchronizer::new();
        selection.select_from_tree(&mut tree, &[0, 0]);

        assert!(selection.select_from_tree(&mut tree, &[0]).is_none());
        assert_eq!(selection.selected(), Some(&ElementRef::new(ElementKind::Column, "1")));
        assert_eq!(highlighted(&tree), vec!["StbColumns"]);

        assert!(selection.select_from_tree(&mut tree, &[7]).is_none());
    }

    #[test]
    fn test_viewport_selection_drives_tree() {
        let mut tree = tree();
        let mut selection = SelectionSynchronizer::new();
        selection.select_from_tree(&mut tree, &[0, 0]);

        let change = selection
            .select_from_viewport(&mut tree, Some(ElementRef::new(ElementKind::Column, "2")));
        assert_eq!(change.previous, Some(ElementRef::new(ElementKind::Column, "1")));
        assert_eq!(highlighted(&tree), vec!["StbColumn (id: 2)"]);

        // A miss deselects everything
        let change = selection.select_from_viewport(&mut tree, None);
        assert!(change.current.is_none());
        assert!(selection.selected().is_none());
        assert!(highlighted(&tree).is_empty());
    }

    #[test]
    fn test_at_most_one_selected() {
        let mut tree = tree();
        let mut selection = SelectionSynchronizer::new();
        let columns = [
            ElementRef::new(ElementKind::Column, "1"),
            ElementRef::new(ElementKind::Column, "2"),
        ];

        selection.select_from_tree(&mut tree, &[0, 0]);
        selection.select_from_viewport(&mut tree, Some(columns[1].clone()));
        selection.select_from_tree(&mut tree, &[0, 0]);

        let selected = columns.iter().filter(|c| selection.is_selected(c)).count();
        assert_eq!(selected, 1);
        assert!(highlighted(&tree).len() <= 1);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut selection = SelectionSynchronizer::new();
        let sink = Rc::clone(&seen);
        selection.subscribe(move |change| sink.borrow_mut().push(change.source));

        let mut tree = tree();
        selection.select_from_tree(&mut tree, &[0, 0]);
        selection.select_from_viewport(&mut tree, None);
        selection.clear();

        assert_eq!(
            *seen.borrow(),
            vec![SelectionSource::Tree, SelectionSource::Viewport, SelectionSource::Reset]
        );
    }
}
