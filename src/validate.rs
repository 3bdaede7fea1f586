use crate::{
    error::Error,
    span::Span,
    syntax::{self, Anchors, Atom},
};

/// The result of successfully validating a pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Validation {
    groups: usize,
    fixed_len: Option<usize>,
}

impl Validation {
    /// Returns the number of capture slots a buffer needs in order to record
    /// every group in the pattern: the number of capturing groups plus one
    /// for the whole match.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_recursive::validate;
    ///
    /// assert_eq!(4, validate("((.*)* (a))")?.captures_len());
    /// assert_eq!(1, validate("[()]*")?.captures_len());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn captures_len(&self) -> usize {
        self.groups + 1
    }

    /// Returns the number of capturing groups in the pattern, not counting
    /// the implicit group for the whole match.
    pub fn group_len(&self) -> usize {
        self.groups
    }

    /// Returns the length of every match of the pattern, if all of its
    /// matches have the same length.
    ///
    /// This is informational. Matching never consults it.
    pub fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }
}

/// Checks that `pattern` is syntactically valid and counts its capturing
/// groups.
///
/// This is the only routine that reports why a pattern is malformed. The
/// matching routines never validate: they treat a malformed pattern as one
/// that matches nothing.
///
/// # Example
///
/// ```
/// use regex_recursive::validate;
///
/// assert_eq!(2, validate("(a)")?.captures_len());
/// assert!(validate("a{2").is_err());
/// assert!(validate("(a))").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn validate<P: AsRef<[u8]> + ?Sized>(
    pattern: &P,
) -> Result<Validation, Error> {
    let anchors = Anchors::strip(Span::new(pattern.as_ref()));
    let body = anchors.body;
    let (shape, len) = alternation(body)?;
    if len < body.len() {
        // The only thing that stops a top-level alternation early is a ')'
        // with no matching '('.
        return Err(Error::new(
            syntax::ERR_GROUP_UNOPENED,
            body.start() + len,
        ));
    }
    let validation =
        Validation { groups: shape.groups, fixed_len: shape.fixed_len };
    debug!("validated {:?}: {:?}", body, validation);
    Ok(validation)
}

/// What is known about a sub-pattern after scanning it.
#[derive(Clone, Copy, Debug)]
struct Shape {
    groups: usize,
    fixed_len: Option<usize>,
}

fn alternation(pattern: Span<'_>) -> Result<(Shape, usize), Error> {
    let mut len = 0;
    let mut shape: Option<Shape> = None;
    loop {
        let (next, n) = branch(pattern.advance(len))?;
        len += n;
        shape = Some(match shape {
            None => next,
            Some(prev) => Shape {
                groups: prev.groups + next.groups,
                fixed_len: match (prev.fixed_len, next.fixed_len) {
                    (Some(a), Some(b)) if a == b => Some(a),
                    _ => None,
                },
            },
        });
        if pattern.get(len) != Some(b'|') {
            break;
        }
        len += 1;
    }
    // The loop always runs at least once.
    let shape = shape.unwrap_or(Shape { groups: 0, fixed_len: Some(0) });
    Ok((shape, len))
}

fn branch(pattern: Span<'_>) -> Result<(Shape, usize), Error> {
    let mut len = 0;
    let mut shape = Shape { groups: 0, fixed_len: Some(0) };
    while let Some(unit) = syntax::unit(pattern.advance(len))? {
        let atom_len = match unit.atom {
            Atom::Step(_) => Some(1),
            Atom::Group { body, .. } => alternation(body)?.0.fixed_len,
        };
        let unit_len = match (atom_len, unit.quant.exact()) {
            (Some(atom_len), Some(count)) => atom_len.checked_mul(count),
            _ => None,
        };
        shape.groups += unit.slots();
        shape.fixed_len = match (shape.fixed_len, unit_len) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        len += unit.len;
    }
    Ok((shape, len))
}
