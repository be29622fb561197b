//! End-to-end conversion behaviour: line merging, breaks, styles, and a full
//! clipboard payload as a terminal export produces it.

use ansicopy::{convert_to_ansi, extract_fragment, markup_to_ansi, strip_sgr};
use rstest::rstest;

const RESET: &str = "\x1b[0m";

#[test]
fn soft_wrap_keeps_style_across_containers() {
    let html = "<div><span style='color: yellow'>Built-in account fo</span></div>\
                <div><span>r guest access</span></div>";
    let out = convert_to_ansi(html);

    let fo = out.find("fo").unwrap();
    let r = fo + 2 + out[fo + 2..].find('r').unwrap();
    let between = &out[fo + 2..r];
    assert!(!between.contains(RESET), "reset between merged runs: {out:?}");
    assert!(!between.contains('\n'));
    assert_eq!(out, "\x1b[33mBuilt-in account for guest access");
}

#[test]
fn soft_wrap_retracts_every_trailing_reset() {
    let html = "<div><span style=\"color:#cd3131\"><span style=\"font-weight:bold\">wro</span></span></div>\
                <div>ng</div>";
    assert_eq!(convert_to_ansi(html), "\x1b[31m\x1b[1mwrong");
}

#[test]
fn restyled_continuation() {
    let html = "<div><span style=\"color:#cd3131;background-color:#1e1e1e\">error: something went wro</span></div>\
                <div><span style=\"color:#cd3131;background-color:#1e1e1e\">ng</span></div>";
    assert_eq!(
        convert_to_ansi(html),
        "\x1b[31m\x1b[40merror: something went wro\x1b[31m\x1b[40mng"
    );
}

#[rstest]
#[case::whitespace_ended_line("<div>line one </div><div>line two</div>", "line one \nline two")]
#[case::explicit_break("<div>a<br>b</div>", "a\nb")]
#[case::self_closing_break("<div>a<br/>b</div>", "a\nb")]
#[case::closing_break("a</br>b", "a\nb")]
#[case::tag_names_ignore_case("<DIV>a </DIV><Div>b</Div>", "a \nb")]
#[case::non_whitespace_line_merges("<div>abc</div><div>def</div>", "abcdef")]
#[case::empty_line_is_a_break("<div></div><div>x</div>", "\nx")]
#[case::lone_break_is_trimmed("<div><br></div>", "")]
#[case::many_trailing_closes("<div>x </div><div> </div></div></div>", "x \n ")]
#[case::entities("<div>a &amp;&nbsp;b&lt;c&gt;</div>", "a & b<c>")]
#[case::unterminated_tag_is_text("a<b", "a<b")]
#[case::unknown_tags_dropped("<p><b>x</b></p>", "x")]
#[case::plain_text("just text", "just text")]
#[case::empty("", "")]
fn converts(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert_to_ansi(html), expected);
}

#[rstest]
#[case("font-weight: 700", true)]
#[case("font-weight: bold", true)]
#[case("font-weight: 400", false)]
#[case("font-weight: normal", false)]
fn bold_threshold(#[case] style: &str, #[case] bold: bool) {
    let out = convert_to_ansi(&format!("<span style=\"{style}\">x</span> "));
    assert_eq!(out.contains("\x1b[1m"), bold, "{out:?}");
}

#[rstest]
#[case("#cd3131", "\x1b[31m")]
#[case("#f14c4c", "\x1b[91m")]
#[case("#fff", "\x1b[97m")]
#[case("rgb(13, 188, 121)", "\x1b[32m")]
#[case("rgba(59, 142, 234, 0.8)", "\x1b[94m")]
fn foreground_colours(#[case] colour: &str, #[case] sgr: &str) {
    let out = convert_to_ansi(&format!("<span style=\"color: {colour}\">x</span> "));
    assert_eq!(out, format!("{sgr}x{RESET} "));
}

#[test]
fn background_and_decorations() {
    let out = convert_to_ansi(
        "<span style=\"background-color: #2472c8; font-style: italic; text-decoration: underline line-through\">x</span> ",
    );
    assert_eq!(out, "\x1b[44m\x1b[3m\x1b[4m\x1b[9mx\x1b[0m ");
}

#[test]
fn unparseable_colour_emits_nothing() {
    assert_eq!(
        convert_to_ansi("<span style=\"color: var(--x); font-family: mono\">x</span> "),
        "x\x1b[0m "
    );
}

#[test]
fn never_ends_with_newline() {
    for html in [
        "<div>a </div>",
        "<div>a </div></div></div>",
        "a<br><br><br>",
        "<div>a</div><br>",
        "\n\n",
    ] {
        assert!(!convert_to_ansi(html).ends_with('\n'), "{html:?}");
    }
}

#[test]
fn vscode_payload() {
    let raw = "Version:0.9\r\nStartHTML:0000000105\r\nEndHTML:0000000600\r\n\
               StartFragment:0000000141\r\nEndFragment:0000000560\r\n\
               <html><body><!--StartFragment-->\
               <div style=\"font-family: Menlo; color: #cccccc; background-color: #1e1e1e\">\
               <div><span style=\"color: #0dbc79;\">user@host</span><span>:</span>\
               <span style=\"color: #3b8eea; font-weight: bold;\">~/src</span><span>$ ls </span></div>\
               <div><span style=\"color: #e5e5e5;\">Cargo.toml  src </span></div>\
               </div><!--EndFragment--></body></html>";

    let fragment = extract_fragment(raw);
    assert!(fragment.starts_with("<div style="));
    assert!(fragment.ends_with("</div></div>"));

    let out = markup_to_ansi(raw).unwrap();
    insta::assert_snapshot!(
        format!("{out:?}"),
        @r#""\u{1b}[32muser@host\u{1b}[0m:\u{1b}[0m\u{1b}[94m\u{1b}[1m~/src\u{1b}[0m$ ls \u{1b}[0m\n\u{1b}[37mCargo.toml  src \u{1b}[0m""#
    );
    assert_eq!(strip_sgr(&out), "user@host:~/src$ ls \nCargo.toml  src ");
}
