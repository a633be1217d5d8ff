//! MCTS Engine: selection/expansion/rollout/backpropagation over
//! `CrosswordState`, with a most-constrained-variable dead-end zeroing rule
//! and an options-based tie-break.

mod stats;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::CrosswordError;
use crate::state::CrosswordState;

pub use stats::{ActionStats, StatsTable};

/// One node of the search tree. Parent links are weak so that committing a
/// move (dropping the old root) releases every sibling subtree.
pub struct TreeNode {
    pub state: CrosswordState,
    parent: Option<Weak<RefCell<TreeNode>>>,
    pub action_leading_here: Option<String>,
    children: BTreeMap<String, Rc<RefCell<TreeNode>>>,
    pub is_terminal: bool,
    pub is_fully_expanded: bool,
    pub num_visits: u64,
    pub reward: usize,
    pub num_options: Option<usize>,
}

impl TreeNode {
    fn new_root(state: CrosswordState) -> Self {
        let is_terminal = state.is_terminal();
        let num_options = state.num_options();
        TreeNode {
            state,
            parent: None,
            action_leading_here: None,
            children: BTreeMap::new(),
            is_terminal,
            is_fully_expanded: is_terminal,
            num_visits: 0,
            reward: 0,
            num_options,
        }
    }
}

/// The search engine itself: owns the tree root and the shared RNG used for
/// rollouts.
pub struct Mcts {
    root: Rc<RefCell<TreeNode>>,
    iteration_limit: usize,
    exploration_constant: f64,
    rng: StdRng,
}

impl Mcts {
    pub fn new(
        initial_state: CrosswordState,
        iteration_limit: usize,
        exploration_constant: f64,
        rng: StdRng,
    ) -> Result<Self, CrosswordError> {
        if iteration_limit < 1 {
            return Err(CrosswordError::Configuration(
                "iteration_limit must be at least 1".to_string(),
            ));
        }
        Ok(Mcts {
            root: Rc::new(RefCell::new(TreeNode::new_root(initial_state))),
            iteration_limit,
            exploration_constant,
            rng,
        })
    }

    pub fn root_state(&self) -> CrosswordState {
        self.root.borrow().state.clone()
    }

    pub fn root_is_terminal(&self) -> bool {
        self.root.borrow().is_terminal
    }

    /// Hands the shared RNG back to the caller, e.g. so the solver driver
    /// can reuse it for a grid pre-processor retry.
    pub fn into_rng(self) -> StdRng {
        self.rng
    }

    /// Runs `iteration_limit` select/expand/rollout/backpropagate rounds
    /// starting from the current root.
    pub fn search(&mut self) -> Result<(), CrosswordError> {
        for _ in 0..self.iteration_limit {
            let selected = self.select_node(Rc::clone(&self.root));
            let is_terminal = selected.borrow().is_terminal;
            let (rolled_from, reward) = if is_terminal {
                let reward = selected.borrow().state.reward();
                (selected, reward)
            } else {
                let child = self.expand(&selected)?;
                let reward = self.rollout(&child.borrow().state.clone())?;
                (child, reward)
            };
            self.backpropagate(Some(rolled_from), reward);
        }
        Ok(())
    }

    fn select_node(&self, mut node: Rc<RefCell<TreeNode>>) -> Rc<RefCell<TreeNode>> {
        loop {
            let (is_terminal, is_fully_expanded) = {
                let node_ref = node.borrow();
                (node_ref.is_terminal, node_ref.is_fully_expanded)
            };
            if is_terminal || !is_fully_expanded {
                return node;
            }
            node = self.get_best_child(&node, self.exploration_constant);
        }
    }

    fn expand(&self, node: &Rc<RefCell<TreeNode>>) -> Result<Rc<RefCell<TreeNode>>, CrosswordError> {
        let action = {
            let node_ref = node.borrow();
            node_ref
                .state
                .possible_actions()
                .iter()
                .find(|a| !node_ref.children.contains_key(a.as_str()))
                .cloned()
        };
        let action = action.ok_or_else(|| {
            CrosswordError::InvalidState("expand called with no untried actions left".to_string())
        })?;

        let child_state = node.borrow().state.take_action(&action)?;
        let child = Rc::new(RefCell::new(TreeNode {
            is_terminal: child_state.is_terminal(),
            is_fully_expanded: child_state.is_terminal(),
            num_options: child_state.num_options(),
            state: child_state,
            parent: Some(Rc::downgrade(node)),
            action_leading_here: Some(action.clone()),
            children: BTreeMap::new(),
            num_visits: 0,
            reward: 0,
        }));

        let mut node_mut = node.borrow_mut();
        node_mut.children.insert(action, Rc::clone(&child));
        let total_actions = node_mut.state.possible_actions().len();
        node_mut.is_fully_expanded = node_mut.children.len() == total_actions;
        drop(node_mut);

        Ok(child)
    }

    fn rollout(&mut self, state: &CrosswordState) -> Result<usize, CrosswordError> {
        let mut current = state.clone();
        while !current.is_terminal() {
            let actions = current.possible_actions();
            let index = self.rng.gen_range(0, actions.len());
            let action = actions[index].clone();
            current = current.take_action(&action)?;
        }
        Ok(current.reward())
    }

    fn backpropagate(&self, mut node: Option<Rc<RefCell<TreeNode>>>, reward: usize) {
        while let Some(current) = node {
            let parent = {
                let mut current_mut = current.borrow_mut();
                current_mut.num_visits += 1;
                current_mut.reward = current_mut.reward.max(reward);
                current_mut.parent.as_ref().and_then(|w| w.upgrade())
            };
            node = parent;
        }
    }

    /// UCT-style selection score with dead-end zeroing: `exploration == 0.0`
    /// gives pure exploitation, used when committing a move.
    fn get_best_child(&self, parent: &Rc<RefCell<TreeNode>>, exploration: f64) -> Rc<RefCell<TreeNode>> {
        let parent_ref = parent.borrow();
        let parent_visits = parent_ref.num_visits as f64;

        let mut best: Option<Rc<RefCell<TreeNode>>> = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_options = 0usize;

        for child in parent_ref.children.values() {
            let (reward, num_visits, num_options) = {
                let child_ref = child.borrow();
                (child_ref.reward, child_ref.num_visits, child_ref.num_options)
            };
            let mut score = reward as f64
                + exploration * (parent_visits.ln() / num_visits as f64).sqrt();
            if num_options == Some(0) {
                score = 0.0;
            }
            let options = num_options.unwrap_or(0);

            let take = match best {
                None => true,
                Some(_) => match score.partial_cmp(&best_score) {
                    Some(std::cmp::Ordering::Greater) => true,
                    Some(std::cmp::Ordering::Equal) => options > best_options,
                    _ => false,
                },
            };
            if take {
                best = Some(Rc::clone(child));
                best_score = score;
                best_options = options;
            }
        }

        best.expect("get_best_child called on a node with no children")
    }

    fn stats_table(&self) -> StatsTable {
        let root_ref = self.root.borrow();
        root_ref
            .children
            .iter()
            .map(|(action, child)| {
                let child_ref = child.borrow();
                (
                    action.clone(),
                    ActionStats {
                        visits: child_ref.num_visits,
                        reward: child_ref.reward,
                        options: child_ref.num_options.unwrap_or(0),
                    },
                )
            })
            .collect()
    }

    /// Picks the best child of the current root with zero exploration, makes
    /// it the new root (dropping the old root and every other sibling), and
    /// returns the committed word plus the statistics table as observed just
    /// before the commit.
    pub fn commit_best_child(&mut self) -> Result<(String, StatsTable), CrosswordError> {
        if self.root.borrow().children.is_empty() {
            return Err(CrosswordError::InvalidState(
                "commit_best_child called before any search round ran".to_string(),
            ));
        }
        let stats = self.stats_table();
        let best = self.get_best_child(&self.root, 0.0);
        let action = best
            .borrow()
            .action_leading_here
            .clone()
            .expect("committed child always has an action_leading_here");
        best.borrow_mut().parent = None;
        debug!("committed word {}", action);
        self.root = best;
        Ok((action, stats))
    }

    /// Counts generations from the root in which every frontier node is
    /// fully expanded; stops at the first generation that is not, or at the
    /// first empty child set.
    pub fn known_depth(&self) -> usize {
        let mut depth = 0usize;
        let mut frontier = vec![Rc::clone(&self.root)];
        loop {
            if frontier.is_empty() || !frontier.iter().all(|n| n.borrow().is_fully_expanded) {
                break;
            }
            depth += 1;
            let next: Vec<_> = frontier
                .iter()
                .flat_map(|n| n.borrow().children.values().cloned().collect::<Vec<_>>())
                .collect();
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        depth
    }
}
