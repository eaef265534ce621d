//! Text rendering of a transition graph.

use super::StateGraph;
use crate::core::State;

const LEGEND: &str = "(*) Only manual transitions";

impl<S: State> StateGraph<S> {
    /// Render the graph as an indented tree rooted at the initial state.
    ///
    /// Manual states carry a `(*)` suffix. A subtree reachable along several
    /// edges is printed under each of them. A state that already appears on
    /// the branch leading to it closes a cycle: it is printed with a `(↻)`
    /// suffix and not expanded again.
    ///
    /// ```text
    ///
    /// └─pending
    ///   ├─processed
    ///   │ └─fulfilled
    ///   └─cancelled(*)
    ///
    /// (*) Only manual transitions
    /// ```
    pub fn diagram(&self) -> String {
        let mut out = String::from("\n");
        let mut branch = Vec::new();
        self.print(&self.root, "", true, &mut branch, &mut out);
        out.push('\n');
        out.push_str(LEGEND);
        out
    }

    fn print<'a>(
        &'a self,
        state: &'a S,
        indent: &str,
        is_last: bool,
        branch: &mut Vec<&'a S>,
        out: &mut String,
    ) {
        let (connector, child_indent) = if is_last {
            ("└─", format!("{indent}  "))
        } else {
            ("├─", format!("{indent}│ "))
        };

        out.push_str(indent);
        out.push_str(connector);
        out.push_str(state.name());
        if self.is_manual(state) {
            out.push_str("(*)");
        }

        if branch.contains(&state) {
            out.push_str("(↻)\n");
            return;
        }
        out.push('\n');

        if let Some(targets) = self.adjacency.get(state) {
            branch.push(state);
            for (idx, next) in targets.iter().enumerate() {
                self.print(next, &child_indent, idx == targets.len() - 1, branch, out);
            }
            branch.pop();
        }
    }
}
