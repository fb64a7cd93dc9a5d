//! Indented text form of the category tree
//!
//! One category per line; nesting is expressed by leading indentation. Each tab
//! is one level, and spaces count in groups of `indent_width`:
//!
//! ```text
//! Food
//!     Groceries
//!     Restaurants
//! Transport
//! ```
//!
//! A line's parent is the nearest preceding line one level shallower. The first
//! line must be a root and no line may sit more than one level below the line
//! before it. Names are trimmed, must be unique across the whole text and may
//! not be the reserved fallback name.

use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;
use crate::models::{Category, CategoryId};

/// One line of parsed tree text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCategory {
    pub name: String,
    /// Name of the parent line, `None` for roots
    pub parent: Option<String>,
    pub depth: usize,
}

/// Parse indented text into categories, parents always before children
pub fn parse_tree(
    text: &str,
    indent_width: usize,
) -> Result<Vec<ParsedCategory>, ValidationError> {
    let mut parsed = Vec::new();
    let mut ancestors: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let depth = indent_depth(line, indent_width)
            .ok_or(ValidationError::BadIndent { line: line_no })?;
        if depth > ancestors.len() {
            return Err(ValidationError::IndentJump {
                line: line_no,
                name: name.to_string(),
            });
        }

        if name == Category::NOT_STATED {
            return Err(ValidationError::ReservedCategory {
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateCategory {
                name: name.to_string(),
            });
        }

        ancestors.truncate(depth);
        parsed.push(ParsedCategory {
            name: name.to_string(),
            parent: ancestors.last().cloned(),
            depth,
        });
        ancestors.push(name.to_string());
    }

    Ok(parsed)
}

/// Nesting level of a line, `None` when its spaces do not form whole levels
fn indent_depth(line: &str, indent_width: usize) -> Option<usize> {
    let width = indent_width.max(1);
    let mut levels = 0;
    let mut spaces = 0;

    for c in line.chars() {
        match c {
            '\t' => {
                if spaces % width != 0 {
                    return None;
                }
                levels += spaces / width + 1;
                spaces = 0;
            }
            ' ' => spaces += 1,
            _ => break,
        }
    }

    (spaces % width == 0).then_some(levels + spaces / width)
}

/// Render categories as tree text, one tab per level
///
/// Roots and siblings keep their store order. The fallback category is left
/// out; a category whose parent is missing is shown as a root.
pub fn render_tree(categories: &[Category]) -> String {
    let known: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();
    let mut children: HashMap<Option<CategoryId>, Vec<&Category>> = HashMap::new();
    for category in categories.iter().filter(|c| !c.is_sentinel()) {
        let parent = category.parent.filter(|p| known.contains(p));
        children.entry(parent).or_default().push(category);
    }

    let mut lines = Vec::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<(&Category, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|c| (*c, 0)).collect())
        .unwrap_or_default();

    while let Some((category, depth)) = stack.pop() {
        if !visited.insert(category.id) {
            continue;
        }
        lines.push(format!("{}{}", "\t".repeat(depth), category.name));
        if let Some(kids) = children.get(&Some(category.id)) {
            stack.extend(kids.iter().rev().map(|c| (*c, depth + 1)));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_parents(parsed: &[ParsedCategory]) -> Vec<(&str, Option<&str>)> {
        parsed
            .iter()
            .map(|p| (p.name.as_str(), p.parent.as_deref()))
            .collect()
    }

    #[test]
    fn test_parse_nested() {
        let text = "Food\n\tGroceries\n\tRestaurants\n\t\tCoffee\nTransport\n";
        let parsed = parse_tree(text, 4).unwrap();

        assert_eq!(
            names_and_parents(&parsed),
            vec![
                ("Food", None),
                ("Groceries", Some("Food")),
                ("Restaurants", Some("Food")),
                ("Coffee", Some("Restaurants")),
                ("Transport", None),
            ]
        );
        assert_eq!(parsed[3].depth, 2);
    }

    #[test]
    fn test_parse_spaces_and_blank_lines() {
        let text = "\nFood  \n    Groceries\n\n        Fruit\n  \nRent\r\n";
        let parsed = parse_tree(text, 4).unwrap();

        assert_eq!(
            names_and_parents(&parsed),
            vec![
                ("Food", None),
                ("Groceries", Some("Food")),
                ("Fruit", Some("Groceries")),
                ("Rent", None),
            ]
        );
    }

    #[test]
    fn test_custom_indent_width() {
        let parsed = parse_tree("A\n  B\n    C", 2).unwrap();
        assert_eq!(parsed[2].parent.as_deref(), Some("B"));
    }

    #[test]
    fn test_empty_text_is_legal() {
        assert!(parse_tree("", 4).unwrap().is_empty());
        assert!(parse_tree("\n  \n\t\n", 4).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_anywhere_in_tree() {
        let err = parse_tree("A\n\tX\nB\n\tX", 4).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateCategory { name: "X".into() });

        let err = parse_tree("A\n  A  ", 2).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateCategory { name: "A".into() });
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(parse_tree("food\nFood", 4).unwrap().len(), 2);
    }

    #[test]
    fn test_indent_jump() {
        let err = parse_tree("A\n\t\tB", 4).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IndentJump {
                line: 2,
                name: "B".into()
            }
        );

        let err = parse_tree("\tA", 4).unwrap_err();
        assert!(matches!(err, ValidationError::IndentJump { line: 1, .. }));
    }

    #[test]
    fn test_dedent_by_several_levels() {
        let parsed = parse_tree("A\n\tB\n\t\tC\nD\n\tE", 4).unwrap();
        assert_eq!(parsed[3].parent, None);
        assert_eq!(parsed[4].parent.as_deref(), Some("D"));
    }

    #[test]
    fn test_bad_indent() {
        let err = parse_tree("A\n   B", 4).unwrap_err();
        assert_eq!(err, ValidationError::BadIndent { line: 2 });
    }

    #[test]
    fn test_reserved_name() {
        let err = parse_tree("A\n\tNot stated", 4).unwrap_err();
        assert!(matches!(err, ValidationError::ReservedCategory { .. }));
    }

    #[test]
    fn test_render_skips_sentinel_and_nests() {
        let sentinel = Category::not_stated();
        let food = Category::new("Food");
        let groceries = Category::with_parent("Groceries", food.id);
        let fruit = Category::with_parent("Fruit", groceries.id);
        let rent = Category::new("Rent");
        let categories = vec![sentinel, food, rent, groceries, fruit];

        assert_eq!(
            render_tree(&categories),
            "Food\n\tGroceries\n\t\tFruit\nRent"
        );
    }

    #[test]
    fn test_render_then_parse_keeps_relations() {
        let a = Category::new("A");
        let b = Category::new("B");
        let c = Category::with_parent("C", b.id);
        let text = render_tree(&[a, b, c]);

        let parsed = parse_tree(&text, 4).unwrap();
        assert_eq!(
            names_and_parents(&parsed),
            vec![("A", None), ("B", None), ("C", Some("B"))]
        );
    }

    #[test]
    fn test_render_dangling_parent_as_root() {
        let orphan = Category::with_parent("Orphan", CategoryId::new());
        assert_eq!(render_tree(&[orphan]), "Orphan");
    }
}
