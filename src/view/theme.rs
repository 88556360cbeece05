//! Built-in CSS themes.
//!
//! Every theme shares the same structural rules (what hides, what outlines, how
//! tables grid) and differs only in its palette. The fold mechanism lives entirely in
//! the structural rules: a `lvl-` block is hidden unless a sibling checkbox before it
//! is checked.

use std::fmt;
use std::str::FromStr;

const STRUCTURE: &str = r#"
        html { font-family: sans-serif; }
        [class*='lvl-'] { display: none; cursor: auto; }
        input:checked~[class*='lvl-'] { display: block; }
        .gone { display: none; }
        label { cursor: pointer; }
        table, th, td { padding: 0.1em 0em; margin-left: auto; margin-right: auto; }
        td.min { width: 1%; white-space: nowrap; }
        h1 { font-size: 3em; margin: 0em; }
        h2 { font-size: 1.75em; margin: 0.2em; }
        hr { border: none; height: 0.3em; }
        pre { text-align: left; }
        .centered { text-align: center; }
        .left_justified { float: left; }
        .boolog { border-radius: 0.25em; border-width: 0.1em; border-style: solid; display: inline-block; }
        .outlined { display: inline-block; border-radius: 0.5em; border-width: 0.05em; border-style: solid; padding: 0.2em 0.2em; }
        .object { border-radius: 1.5em; border-width: 0.3em; border-style: solid; display: inline-block; padding: 0.4em 0.4em; }
        .incoming { border-radius: 3em 0.5em 0.5em 3em; border-width: 0.3em; border-style: solid; display: inline-block; padding: 1em 1em; }
        .outgoing { border-radius: 0.5em 3em 3em 0.5em; border-width: 0.3em; border-style: solid; display: inline-block; padding: 1em 1em; }
        table.gridlines, table.gridlines th, table.gridlines td { padding: 0.4em 0.4em; border-collapse: collapse; border-width: 0.02em; border-style: solid; }
"#;

const CLASSIC: &str = r#"
        .boolog, .outlined, .object, .incoming, .outgoing, table.gridlines, table.gridlines td { border-color: black; }
        hr { background-color: black; }
        .boolog { background-image: linear-gradient(to bottom right, white, WhiteSmoke); }
        .highlighted { background-image: linear-gradient(to bottom right, yellow, gold); }
        .neutral { background-image: linear-gradient(to bottom right, White, LightGrey); }
        .plate { background-image: radial-gradient(GhostWhite, LightSteelBlue); }
        .implied_good { background-image: linear-gradient(to bottom right, mintcream, honeydew); }
        .implied_caution { background-image: linear-gradient(to bottom right, LemonChiffon, oldlace); }
        .implied_bad { background-image: linear-gradient(to bottom right, Seashell, LavenderBlush); }
        .exception { background-image: linear-gradient(to bottom right, yellow, salmon); }
        .passing_test_result { background-image: linear-gradient(to bottom right, honeydew, palegreen); }
        .failing_test_result { background-image: linear-gradient(to bottom right, MistyRose, salmon); }
        .inconclusive_test_result { background-image: linear-gradient(to bottom right, LemonChiffon, Moccasin); }
"#;

const DARK_FLAT: &str = r#"
        body { background-color: #1E1E1E; color: #D4D4D4; }
        .boolog, .outlined, .object, .incoming, .outgoing, table.gridlines, table.gridlines td { border-color: #808080; }
        hr { background-color: #808080; }
        .boolog { background-color: #252526; }
        .highlighted { background-color: #8A5A00; color: #FFFFFF; }
        .neutral { background-color: #333333; }
        .plate { background-color: #2D3340; }
        .implied_good { background-color: #1F3A26; }
        .implied_caution { background-color: #3F3A1C; }
        .implied_bad { background-color: #47201F; }
        .exception { background-color: #5C2A12; }
        .passing_test_result { background-color: #23502C; }
        .failing_test_result { background-color: #5A1F1F; }
        .inconclusive_test_result { background-color: #54481A; }
"#;

const DARK_GRADIENT: &str = r#"
        body { background-color: #121212; color: #E0E0E0; }
        .boolog, .outlined, .object, .incoming, .outgoing, table.gridlines, table.gridlines td { border-color: #A0A0A0; }
        hr { background-image: linear-gradient(to right, #A0A0A0, #303030); }
        .boolog { background-image: linear-gradient(to bottom right, #2A2A2A, #1A1A1A); }
        .highlighted { background-image: linear-gradient(to bottom right, #9A6B00, #5E4100); color: #FFFFFF; }
        .neutral { background-image: linear-gradient(to bottom right, #3A3A3A, #242424); }
        .plate { background-image: radial-gradient(#37415A, #1D2230); }
        .implied_good { background-image: linear-gradient(to bottom right, #24452D, #16291B); }
        .implied_caution { background-image: linear-gradient(to bottom right, #4D4622, #2B2713); }
        .implied_bad { background-image: linear-gradient(to bottom right, #552624, #301615); }
        .exception { background-image: linear-gradient(to bottom right, #6B3A00, #5A1F1F); }
        .passing_test_result { background-image: linear-gradient(to bottom right, #2B5E35, #183820); }
        .failing_test_result { background-image: linear-gradient(to bottom right, #6A2525, #3A1414); }
        .inconclusive_test_result { background-image: linear-gradient(to bottom right, #645620, #3A3212); }
"#;

/// A built-in stylesheet for the HTML artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Classic,
    DarkFlat,
    DarkGradient,
}

impl Theme {
    /// All built-in themes.
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::DarkFlat, Theme::DarkGradient];

    /// Name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::DarkFlat => "dark-flat",
            Theme::DarkGradient => "dark-gradient",
        }
    }

    /// The complete `<style>` element for this theme.
    pub fn css(self) -> String {
        let palette = match self {
            Theme::Classic => CLASSIC,
            Theme::DarkFlat => DARK_FLAT,
            Theme::DarkGradient => DARK_GRADIENT,
        };
        format!("<style>{STRUCTURE}{palette}</style>\r\n")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a theme name matches no built-in theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme \"{0}\" (expected one of: classic, dark-flat, dark-gradient)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
