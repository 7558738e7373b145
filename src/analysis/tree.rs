use tree_sitter::Node;

/// Deepest named node whose byte span contains `position`, or `None` when the
/// position falls outside the tree.
pub fn find_node_at(root: Node<'_>, position: usize) -> Option<Node<'_>> {
    if position < root.start_byte() || position >= root.end_byte() {
        return None;
    }
    let mut current = root;
    loop {
        let mut cursor = current.walk();
        let mut next = None;
        for child in current.named_children(&mut cursor) {
            if child.start_byte() <= position && position < child.end_byte() {
                next = Some(child);
                break;
            }
        }
        match next {
            Some(node) => current = node,
            None => return Some(current),
        }
    }
}

/// Every named node satisfying `predicate`, in pre-order.
pub fn find_all_nodes<'tree, F>(root: Node<'tree>, predicate: F) -> Vec<Node<'tree>>
where
    F: Fn(Node<'tree>) -> bool,
{
    let mut out = Vec::new();
    collect(root, &predicate, &mut out);
    out
}

fn collect<'tree, F>(node: Node<'tree>, predicate: &F, out: &mut Vec<Node<'tree>>)
where
    F: Fn(Node<'tree>) -> bool,
{
    if predicate(node) {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect(child, predicate, out);
    }
}

/// The node itself followed by its parent chain up to the root.
pub fn ancestors(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(Some(node), |current| current.parent())
}

pub fn node_text(node: Node<'_>, source: &str) -> String {
    let start = node.start_byte();
    let end = node.end_byte();
    source.get(start..end).unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract::ComponentExtractor;

    #[test]
    fn finds_deepest_node_at_position() {
        let source = "class Foo { render() { return 1; } }";
        let mut extractor = ComponentExtractor::new().unwrap();
        let tree = extractor.parse(source).unwrap();
        let offset = source.find("return").unwrap() + 1;
        let node = find_node_at(tree.root_node(), offset).unwrap();
        assert_eq!(node.kind(), "return_statement");
        assert!(node.start_byte() <= offset && offset < node.end_byte());
    }

    #[test]
    fn out_of_range_position_is_absent() {
        let source = "const x = 1;";
        let mut extractor = ComponentExtractor::new().unwrap();
        let tree = extractor.parse(source).unwrap();
        assert!(find_node_at(tree.root_node(), source.len() + 10).is_none());
    }

    #[test]
    fn collects_nodes_in_pre_order() {
        let source = "class A { one() {} two() {} }";
        let mut extractor = ComponentExtractor::new().unwrap();
        let tree = extractor.parse(source).unwrap();
        let methods = find_all_nodes(tree.root_node(), |node| node.kind() == "method_definition");
        let names: Vec<String> = methods
            .iter()
            .map(|node| node_text(node.child_by_field_name("name").unwrap(), source))
            .collect();
        assert_eq!(names, ["one", "two"]);
    }

    #[test]
    fn ancestors_walks_to_root() {
        let source = "class A { one() {} }";
        let mut extractor = ComponentExtractor::new().unwrap();
        let tree = extractor.parse(source).unwrap();
        let offset = source.find("one").unwrap();
        let node = find_node_at(tree.root_node(), offset).unwrap();
        let kinds: Vec<&str> = ancestors(node).map(|n| n.kind()).collect();
        assert_eq!(kinds.last(), Some(&"program"));
        assert!(kinds.contains(&"method_definition"));
    }
}
