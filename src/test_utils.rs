use crate::graph::DomGraph;
use crate::io::{DomconReader, GraphReader};

/// Two quantifiers scoping over a common verb: two solved forms.
pub(crate) const EVERY_MAN_LOVES_A_WOMAN: &str = r#"
label(x, every).
hole(xh).
label(y, a).
hole(yh).
label(z, love).
tree(x, xh).
tree(y, yh).
dom(xh, z).
dom(yh, z).
"#;

/// Three quantifiers scoping over a common verb: six solved forms.
pub(crate) const THREE_QUANTIFIERS: &str = r#"
label(x, every).
hole(xh).
label(y, a).
hole(yh).
label(w, some).
hole(wh).
label(z, give).
tree(x, xh).
tree(y, yh).
tree(w, wh).
dom(xh, z).
dom(yh, z).
dom(wh, z).
"#;

/// Two independent parts: two solved forms.
pub(crate) const TWO_COMPONENTS: &str = r#"
label(x, every).
hole(xh).
label(y, a).
hole(yh).
label(z, love).
label(u, not).
hole(uh).
label(v, sleep).
tree(x, xh).
tree(y, yh).
tree(u, uh).
dom(xh, z).
dom(yh, z).
dom(uh, v).
"#;

/// Two fragments dominating each other: no solved form.
pub(crate) const CYCLE: &str = r#"
label(x, f).
hole(xh).
label(y, g).
hole(yh).
tree(x, xh).
tree(y, yh).
dom(xh, y).
dom(yh, x).
"#;

pub(crate) fn read_graph(text: &str) -> DomGraph<String> {
    DomconReader::default()
        .read(&mut text.as_bytes())
        .unwrap()
}
