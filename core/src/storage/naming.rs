use std::path::PathBuf;

use lazy_regex::{lazy_regex, Lazy, Regex};
use maplit::hashmap;

use crate::config::Config;
use crate::str_interp::{interp, InterpError};

static RE_UPPER: Lazy<Regex> = lazy_regex!(r"upper\((.*?)\)");
static RE_LOWER: Lazy<Regex> = lazy_regex!(r"lower\((.*?)\)");

/// Builds testcase filenames from the configured pattern.
///
/// `"#{contest}#{id} upper(#{name})"` with contest `4`, id `A` and name
/// `Watermelon` becomes `4A_WATERMELON.xml` (with `replace_space = "_"`).
#[derive(Debug, Clone, Copy)]
pub struct FileNamer<'c> {
    pattern: &'c str,
    replace_space: &'c str,
    extension: &'c str,
}

impl<'c> FileNamer<'c> {
    pub fn new(pattern: &'c str, replace_space: &'c str, extension: &'c str) -> Self {
        Self {
            pattern,
            replace_space,
            extension,
        }
    }

    pub fn from_config(cfg: &'c Config) -> Self {
        Self::new(&cfg.pattern, &cfg.replace_space, &cfg.extension)
    }

    pub fn filename(
        &self,
        contest_id: &str,
        problem_id: &str,
        name: &str,
    ) -> Result<PathBuf, InterpError> {
        let vars = hashmap! {
            "contest" => contest_id,
            "id" => problem_id,
            "name" => name,
        };
        let s = interp(self.pattern, &vars)?;
        let s = RE_UPPER.replace_all(&s, |caps: &lazy_regex::Captures| caps[1].to_uppercase());
        let s = RE_LOWER.replace_all(&s, |caps: &lazy_regex::Captures| caps[1].to_lowercase());
        let mut s = s.replace(' ', self.replace_space);
        s.push_str(self.extension);
        Ok(PathBuf::from(s))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    #[test]
    fn plain_pattern() {
        let n = FileNamer::new("#{contest}#{id}", "_", ".xml");
        assert_eq!(n.filename("4", "A", "Watermelon").unwrap(), Path::new("4A.xml"));
    }

    #[test]
    fn case_directives_and_spaces() {
        let n = FileNamer::new("#{contest}#{id} - lower(#{name})", "_", ".xml");
        assert_eq!(
            n.filename("1850", "B", "Ten Words of Wisdom").unwrap(),
            Path::new("1850B_-_ten_words_of_wisdom.xml")
        );

        let n = FileNamer::new("upper(#{id})/#{name}", "-", "");
        assert_eq!(
            n.filename("4", "b1", "Before an Exam").unwrap(),
            Path::new("B1/Before-an-Exam")
        );
    }

    #[test]
    fn directives_are_not_greedy() {
        let n = FileNamer::new("upper(#{id}) lower(#{name})", "", ".txt");
        assert_eq!(
            n.filename("4", "a", "Hello World").unwrap(),
            Path::new("Ahelloworld.txt")
        );
    }

    #[test]
    fn unknown_variable() {
        let n = FileNamer::new("#{round}#{id}", "_", ".xml");
        assert_eq!(
            n.filename("4", "A", "x").unwrap_err(),
            InterpError::UndefinedVar("round".to_owned(), 2)
        );
    }
}
