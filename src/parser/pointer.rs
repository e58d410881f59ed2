/// Unescape one identifier segment: `~1` becomes `/`, then `~0` becomes `~`.
///
/// The two passes run in that order so `~01` decodes to `~1` rather than `/`.
pub fn decode(pointer: &str) -> String {
    pointer.replace("~1", "/").replace("~0", "~")
}

// ── Tests ──
