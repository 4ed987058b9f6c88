//! Editing CSS `transform` strings one function at a time.
//!
//! ```
//! use gilded::css::{set_transform, TransformFunction};
//!
//! let t = set_transform("", TransformFunction::TranslateX, "10px");
//! let t = set_transform(&t, TransformFunction::Rotate, "45deg");
//! assert_eq!(t, "translateX(10px) rotate(45deg)");
//! ```

use std::fmt::Display;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A function name followed by its opening parenthesis.
static FUNCTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z_-][\w-]*)\s*\(").expect("transform function pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformFunction {
    Translate,
    TranslateX,
    TranslateY,
    TranslateZ,
    Translate3d,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Rotate3d,
    Scale,
    ScaleX,
    ScaleY,
    ScaleZ,
    Scale3d,
    Skew,
    SkewX,
    SkewY,
    Perspective,
    Matrix,
    Matrix3d,
}

impl TransformFunction {
    pub fn name(self) -> &'static str {
        match self {
            TransformFunction::Translate => "translate",
            TransformFunction::TranslateX => "translateX",
            TransformFunction::TranslateY => "translateY",
            TransformFunction::TranslateZ => "translateZ",
            TransformFunction::Translate3d => "translate3d",
            TransformFunction::Rotate => "rotate",
            TransformFunction::RotateX => "rotateX",
            TransformFunction::RotateY => "rotateY",
            TransformFunction::RotateZ => "rotateZ",
            TransformFunction::Rotate3d => "rotate3d",
            TransformFunction::Scale => "scale",
            TransformFunction::ScaleX => "scaleX",
            TransformFunction::ScaleY => "scaleY",
            TransformFunction::ScaleZ => "scaleZ",
            TransformFunction::Scale3d => "scale3d",
            TransformFunction::Skew => "skew",
            TransformFunction::SkewX => "skewX",
            TransformFunction::SkewY => "skewY",
            TransformFunction::Perspective => "perspective",
            TransformFunction::Matrix => "matrix",
            TransformFunction::Matrix3d => "matrix3d",
        }
    }
}

impl Display for TransformFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Set the argument list of `function` inside `transform`.
///
/// The first top-level occurrence is replaced in place, nested parentheses
/// included; if the function is absent it is appended. Other functions are
/// left untouched, and `rotate` never matches `rotateX`.
pub fn set_transform(transform: &str, function: TransformFunction, value: impl Display) -> String {
    let call = format!("{}({})", function.name(), value);

    match find_call(transform, function.name()) {
        Some(range) => {
            let mut out = String::with_capacity(transform.len() + call.len());
            out.push_str(&transform[..range.start]);
            out.push_str(&call);
            out.push_str(&transform[range.end..]);
            out
        }
        None => {
            let trimmed = transform.trim_end();
            if trimmed.is_empty() {
                call
            } else {
                format!("{} {}", trimmed, call)
            }
        }
    }
}

/// Byte range of the first top-level `name(...)` call in `transform`.
fn find_call(transform: &str, name: &str) -> Option<Range<usize>> {
    let mut pos = 0;
    while let Some(caps) = FUNCTION_HEAD.captures_at(transform, pos) {
        let ident = caps.get(1)?;
        let open = caps.get(0)?.end() - 1;
        let end = call_end(transform, open);
        if ident.as_str().eq_ignore_ascii_case(name) {
            return Some(ident.start()..end);
        }
        pos = end;
    }
    None
}

/// Index just past the `)` balancing the `(` at `open`. An unclosed call
/// runs to the end of the string.
fn call_end(s: &str, open: usize) -> usize {
    let mut depth = 0usize;
    for (i, byte) in s.bytes().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    s.len()
}
