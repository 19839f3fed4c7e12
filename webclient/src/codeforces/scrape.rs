use scraper::{ElementRef, Html, Node};

use crate::{
    error::*,
    model::SampleTestcase,
    util::{self, DocExt as _, ElementRefExt as _},
};

const SEL_PROBLEM_IDS: &str = "table.problems td.id a";
const SEL_TITLE: &str = ".problem-statement > .header > .title";
const SEL_SAMPLE_INPUT: &str = "div.input pre";
const SEL_SAMPLE_OUTPUT: &str = "div.output pre";

/// Problem ids ("A", "B1", ...) from a contest page.
pub fn problem_ids(doc: &Html) -> Vec<String> {
    let sel = util::selector_must_parsed(SEL_PROBLEM_IDS);
    doc.select(&sel)
        .filter_map(|a| a.first_text(SEL_PROBLEM_IDS).ok().map(str::to_owned))
        .collect()
}

/// Problem title as shown on the problem page, e.g. "A. Watermelon".
pub fn title(doc: &Html) -> Result<String> {
    let node = doc.select_first(SEL_TITLE)?;
    Ok(node.first_text(SEL_TITLE)?.to_owned())
}

/// "A. Watermelon" => "Watermelon"
pub fn problem_name_from_title(title: &str) -> &str {
    match title.split_once(". ") {
        Some((_, name)) => name.trim(),
        None => title.trim(),
    }
}

pub fn testcases(doc: &Html) -> Vec<SampleTestcase> {
    let sel_in = util::selector_must_parsed(SEL_SAMPLE_INPUT);
    let sel_out = util::selector_must_parsed(SEL_SAMPLE_OUTPUT);
    doc.select(&sel_in)
        .zip(doc.select(&sel_out))
        .enumerate()
        .map(|(i, (input, output))| SampleTestcase {
            ord: (i + 1) as u32,
            input: extract_testcase(input),
            output: extract_testcase(output),
        })
        .collect()
}

fn extract_testcase(pre: ElementRef) -> String {
    let mut s = String::new();
    push_pre_text(pre, &mut s);
    let mut s = s.trim_start_matches(['\r', '\n']).trim_end().to_owned();
    s.push('\n');
    s
}

// Old statements separate lines with <br>, newer ones wrap each line in a <div>.
fn push_pre_text(el: ElementRef, buf: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(e) if e.name() == "br" => buf.push('\n'),
            Node::Element(e) => {
                let is_line = e.name() == "div";
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_pre_text(child_el, buf);
                }
                if is_line && !buf.ends_with('\n') {
                    buf.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pre_text(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        extract_testcase(doc.select_first("pre").unwrap())
    }

    #[test]
    fn extract_plain_pre() {
        assert_eq!(pre_text("<pre>\n3 4\n1 2\n</pre>"), "3 4\n1 2\n");
    }

    #[test]
    fn extract_br_separated_pre() {
        assert_eq!(pre_text("<pre>3 4<br>1 2<br></pre>"), "3 4\n1 2\n");
    }

    #[test]
    fn extract_line_div_pre() {
        let html = r#"<pre><div class="test-example-line test-example-line-odd">3</div><div class="test-example-line test-example-line-even">1 2 3</div></pre>"#;
        assert_eq!(pre_text(html), "3\n1 2 3\n");
    }

    #[test]
    fn extract_empty_pre() {
        assert_eq!(pre_text("<pre></pre>"), "\n");
    }

    #[test]
    fn problem_ids_skip_blank_links() {
        let doc = Html::parse_document(
            r##"<table class="problems">
              <tr><th>#</th><th>Name</th></tr>
              <tr><td class="id"><a href="/contest/4/problem/A">
                A
              </a></td><td>Watermelon</td></tr>
              <tr><td class="id"><a href="/contest/4/problem/B1"> B1 </a></td><td>Easy</td></tr>
              <tr><td class="id"><a href="#">  </a></td><td>Broken</td></tr>
            </table>"##,
        );
        assert_eq!(problem_ids(&doc), ["A", "B1"]);
    }

    #[test]
    fn name_from_title() {
        assert_eq!(problem_name_from_title("A. Watermelon"), "Watermelon");
        assert_eq!(problem_name_from_title("B1. Easy Version. Really"), "Easy Version. Really");
        assert_eq!(problem_name_from_title("Untitled"), "Untitled");
    }
}
