use crate::response::PathElement;
use std::fmt;

/// Linked-list version of `Vec<PathElement>`, taking advantage of the call stack
///
/// Each recursive step links a new element to its caller’s path
/// instead of mutating a shared buffer.
pub(crate) type LinkedPath<'a> = Option<&'a LinkedPathElement<'a>>;

pub(crate) struct LinkedPathElement<'a> {
    pub(crate) element: PathElement,
    pub(crate) next: LinkedPath<'a>,
}

pub(crate) fn path_to_vec(mut link: LinkedPath<'_>) -> Vec<PathElement> {
    let mut path = Vec::new();
    while let Some(node) = link {
        path.push(node.element.clone());
        link = node.next;
    }
    path.reverse();
    path
}

/// Displays a path within a variable value in messages, like `value.points[1].x`
pub(crate) struct DisplayPath<'a>(pub(crate) &'a [PathElement]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value")?;
        for element in self.0 {
            match element {
                PathElement::Field(name) => write!(f, ".{name}")?,
                PathElement::ListIndex(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name;

    #[test]
    fn linked_path() {
        let points = LinkedPathElement {
            element: PathElement::Field(name!(points)),
            next: None,
        };
        let index = LinkedPathElement {
            element: PathElement::ListIndex(1),
            next: Some(&points),
        };
        let x = LinkedPathElement {
            element: PathElement::Field(name!(x)),
            next: Some(&index),
        };
        let path = path_to_vec(Some(&x));
        assert_eq!(
            path,
            [
                PathElement::Field(name!(points)),
                PathElement::ListIndex(1),
                PathElement::Field(name!(x)),
            ]
        );
        assert_eq!(DisplayPath(&path).to_string(), "value.points[1].x");
        assert_eq!(DisplayPath(&[]).to_string(), "value");
    }
}
