pub(crate) const RED_X: &str = "\u{274C}";
