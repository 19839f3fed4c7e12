//! Testcase file format.
//!
//! ```xml
//! <tests>
//! <input><![CDATA[
//! 3
//! ]]></input>
//! <answer><![CDATA[
//! 9
//! ]]></answer>
//! </tests>
//! ```
//!
//! Every text is wrapped by one `\n` on each side, which is stripped on load.
//! The n-th `input` pairs with the n-th `answer`; other elements are ignored.

use std::{path::Path, str};

use quick_xml::{events::Event, Reader};

use crate::testing::TestCase;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] fsutil::Error),

    #[error("Malformed testcase file: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed testcase file: {0}")]
    Utf8(#[from] str::Utf8Error),

    #[error("Malformed testcase file: {inputs} <input> but {answers} <answer>")]
    CountMismatch { inputs: usize, answers: usize },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Fs(e) if e.is_not_found())
    }
}

pub fn load(filepath: impl AsRef<Path>) -> Result<Vec<TestCase>> {
    let xml = fsutil::read_to_string(filepath)?;
    parse(&xml)
}

pub fn save(filepath: impl AsRef<Path>, cases: &[TestCase]) -> Result<()> {
    fsutil::write_with_mkdir(filepath, to_xml(cases))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Input,
    Answer,
}

pub fn parse(xml: &str) -> Result<Vec<TestCase>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut inputs = Vec::new();
    let mut answers = Vec::new();
    let mut depth = 0usize;
    let mut field: Option<Field> = None;
    let mut buf = String::new();

    let mut push = |f: Field, text: String| match f {
        Field::Input => inputs.push(text),
        Field::Answer => answers.push(text),
    };

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 {
                    field = field_of(e.name().as_ref());
                    buf.clear();
                }
            }
            Event::Empty(e) => {
                if depth == 1 {
                    if let Some(f) = field_of(e.name().as_ref()) {
                        push(f, String::new());
                    }
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(f) = field.take() {
                        push(f, strip_delimiters(&buf).to_owned());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) if depth == 2 && field.is_some() => {
                buf.push_str(&t.unescape()?);
            }
            Event::CData(t) if depth == 2 && field.is_some() => {
                buf.push_str(str::from_utf8(&t.into_inner())?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if inputs.len() != answers.len() {
        return Err(Error::CountMismatch {
            inputs: inputs.len(),
            answers: answers.len(),
        });
    }
    Ok(inputs
        .into_iter()
        .zip(answers)
        .map(|(input, answer)| TestCase { input, answer })
        .collect())
}

fn field_of(name: &[u8]) -> Option<Field> {
    match name {
        b"input" => Some(Field::Input),
        b"answer" => Some(Field::Answer),
        _ => None,
    }
}

fn strip_delimiters(s: &str) -> &str {
    let s = s.strip_prefix('\n').unwrap_or(s);
    s.strip_suffix('\n').unwrap_or(s)
}

pub fn to_xml(cases: &[TestCase]) -> String {
    let mut xml = String::from("<tests>\n");
    for t in cases {
        push_element(&mut xml, "input", &t.input);
        push_element(&mut xml, "answer", &t.answer);
    }
    xml.push_str("</tests>\n");
    xml
}

fn push_element(xml: &mut String, tag: &str, text: &str) {
    // "]]>" cannot appear inside CDATA; split it over two sections.
    let text = text.replace("]]>", "]]]]><![CDATA[>");
    xml.push_str(&format!("<{tag}><![CDATA[\n{text}\n]]></{tag}>\n"));
}
