use std::iter::FusedIterator;
use std::ops::Range;

use log::{debug, trace};
use memchr::memmem::Finder;

use crate::error::{Result, SplitError};

/// Splits text on every non-overlapping occurrence of a literal separator.
///
/// Matching is exact and case-sensitive. The scan runs left to right and a
/// match consumes its bytes before the next search starts, so `"aaa"` split on
/// `"aa"` gives `["", "a"]`. Leading, trailing and adjacent separators produce
/// empty segments, and every split yields at least one segment.
#[derive(Clone, Debug)]
pub struct Segmenter {
    separator: String,
    finder: Finder<'static>,
}

/// Position of one segment inside the input, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// 0-based segment index
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Segmenter {
    /// Fails with [`SplitError::EmptySeparator`] when `separator` is empty.
    pub fn new(separator: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(SplitError::EmptySeparator);
        }
        debug!("build segmenter, separator = {:?}", separator);
        Ok(Segmenter {
            separator: separator.to_string(),
            finder: Finder::new(separator.as_bytes()).into_owned(),
        })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    // 非重叠匹配次数
    pub fn count(&self, input: &str) -> usize {
        self.finder.find_iter(input.as_bytes()).count()
    }

    pub fn segment<'a>(&self, input: &'a str) -> Vec<&'a str> {
        let mut result = Vec::with_capacity(self.count(input) + 1);
        result.extend(self.segments(input));
        trace!(
            "segment input len = {}, segments = {}",
            input.len(),
            result.len()
        );
        result
    }

    pub fn segments<'s, 'a>(&'s self, input: &'a str) -> Segments<'s, 'a> {
        Segments {
            spans: self.spans(input),
        }
    }

    pub fn spans<'s, 'a>(&'s self, input: &'a str) -> Spans<'s, 'a> {
        Spans {
            segmenter: self,
            input,
            cursor: 0,
            index: 0,
            done: false,
        }
    }
}

/// Lazy iterator over segment spans, see [`Segmenter::spans`].
pub struct Spans<'s, 'a> {
    segmenter: &'s Segmenter,
    input: &'a str,
    // 剩余输入的起始位置
    cursor: usize,
    index: usize,
    done: bool,
}

impl<'s, 'a> Iterator for Spans<'s, 'a> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.done {
            return None;
        }
        let rest = &self.input.as_bytes()[self.cursor..];
        let span = match self.segmenter.finder.find(rest) {
            Some(i) => {
                let span = Span {
                    index: self.index,
                    start: self.cursor,
                    end: self.cursor + i,
                };
                self.cursor += i + self.segmenter.separator.len();
                span
            }
            None => {
                self.done = true;
                Span {
                    index: self.index,
                    start: self.cursor,
                    end: self.input.len(),
                }
            }
        };
        self.index += 1;
        Some(span)
    }
}

impl<'s, 'a> FusedIterator for Spans<'s, 'a> {}

/// Lazy iterator over segments, see [`Segmenter::segments`].
pub struct Segments<'s, 'a> {
    spans: Spans<'s, 'a>,
}

impl<'s, 'a> Iterator for Segments<'s, 'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let input = self.spans.input;
        // separator is valid utf-8, so matches always fall on char boundaries
        self.spans.next().map(|span| &input[span.range()])
    }
}

impl<'s, 'a> FusedIterator for Segments<'s, 'a> {}

/// Splits `input` on every non-overlapping occurrence of `separator`.
///
/// ```
/// let parts = seg_split::segment("a,,b", ",").unwrap();
/// assert_eq!(parts, vec!["a", "", "b"]);
/// ```
pub fn segment<'a>(input: &'a str, separator: &str) -> Result<Vec<&'a str>> {
    Ok(Segmenter::new(separator)?.segment(input))
}

/// Reinserts `separator` between adjacent segments.
pub fn join<S: AsRef<str>>(segments: &[S], separator: &str) -> String {
    let total = segments.iter().map(|s| s.as_ref().len()).sum::<usize>()
        + separator.len() * segments.len().saturating_sub(1);
    let mut joined = String::with_capacity(total);
    for (idx, s) in segments.iter().enumerate() {
        if idx > 0 {
            joined.push_str(separator);
        }
        joined.push_str(s.as_ref());
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_once(input: &str, separator: &str, expect: Vec<&str>) {
        let segments = segment(input, separator).unwrap();
        assert_eq!(segments, expect);
    }

    #[test]
    fn test_scenarios() {
        test_once("a,b,c", ",", vec!["a", "b", "c"]);
        test_once("", ",", vec![""]);
        test_once("abc", ",", vec!["abc"]);
        test_once("a,,b", ",", vec!["a", "", "b"]);
        test_once(",a,", ",", vec!["", "a", ""]);
        test_once("aXYbXYc", "XY", vec!["a", "b", "c"]);
    }

    #[test]
    fn test_only_separators() {
        test_once(",", ",", vec!["", ""]);
        test_once(",,,", ",", vec!["", "", "", ""]);
        test_once("XYXY", "XY", vec!["", "", ""]);
    }

    #[test]
    fn test_non_overlapping() {
        test_once("aaa", "aa", vec!["", "a"]);
        test_once("aaaa", "aa", vec!["", "", ""]);
        let segmenter = Segmenter::new("aa").unwrap();
        assert_eq!(segmenter.count("aaaaa"), 2);
    }

    #[test]
    fn test_case_sensitive() {
        test_once("aXbxc", "X", vec!["a", "bxc"]);
    }

    #[test]
    fn test_separator_longer_than_input() {
        test_once("ab", "abc", vec!["ab"]);
    }

    #[test]
    fn test_unicode() {
        test_once("张华，李萍，我们", "，", vec!["张华", "李萍", "我们"]);
        test_once("北京大学", "京大", vec!["北", "学"]);
        test_once("héllo wörld", "ö", vec!["héllo w", "rld"]);
    }

    #[test]
    fn test_empty_separator() {
        assert!(matches!(segment("abc", ""), Err(SplitError::EmptySeparator)));
        assert!(matches!(segment("", ""), Err(SplitError::EmptySeparator)));
        assert!(Segmenter::new("").is_err());
    }

    #[test]
    fn test_spans() {
        let segmenter = Segmenter::new("XY").unwrap();
        let spans: Vec<Span> = segmenter.spans("aXYbbXY").collect();
        assert_eq!(
            spans,
            vec![
                Span { index: 0, start: 0, end: 1 },
                Span { index: 1, start: 3, end: 5 },
                Span { index: 2, start: 7, end: 7 },
            ]
        );
        assert_eq!(spans[1].len(), 2);
        assert!(spans[2].is_empty());
    }

    #[test]
    fn test_segments_fused() {
        let segmenter = Segmenter::new(",").unwrap();
        let mut segments = segmenter.segments("a,b");
        assert_eq!(segments.next(), Some("a"));
        assert_eq!(segments.next(), Some("b"));
        assert_eq!(segments.next(), None);
        assert_eq!(segments.next(), None);
    }

    #[test]
    fn test_segmenter_reuse() {
        let segmenter = Segmenter::new("|").unwrap();
        assert_eq!(segmenter.separator(), "|");
        assert_eq!(segmenter.segment("a|b"), vec!["a", "b"]);
        assert_eq!(segmenter.segment("a|b"), vec!["a", "b"]);
        assert_eq!(segmenter.segment("c"), vec!["c"]);
    }

    #[test]
    fn test_concurrent_use() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Segmenter>();

        let segmenter = Segmenter::new(";").unwrap();
        std::thread::scope(|s| {
            for n in 0..4 {
                let segmenter = &segmenter;
                s.spawn(move || {
                    let input = vec!["x"; n + 1].join(";");
                    assert_eq!(segmenter.segment(&input).len(), n + 1);
                });
            }
        });
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&["a", "", "b"], ","), "a,,b");
        assert_eq!(join(&[""], ","), "");
        assert_eq!(join::<&str>(&[], ","), "");
        assert_eq!(join(&vec!["x".to_string(), "y".to_string()], "XY"), "xXYy");
    }

    proptest! {
        #[test]
        fn prop_join_restores_input(input in "[ab,]{0,40}", separator in "[ab,]{1,3}") {
            let segments = segment(&input, &separator).unwrap();
            prop_assert_eq!(join(&segments, &separator), input);
        }

        #[test]
        fn prop_len_is_count_plus_one(input in "[ab,]{0,40}", separator in "[ab,]{1,3}") {
            let segmenter = Segmenter::new(&separator).unwrap();
            let segments = segmenter.segment(&input);
            prop_assert_eq!(segments.len(), segmenter.count(&input) + 1);
        }

        #[test]
        fn prop_no_match_single_segment(input in "[a-z]{0,40}", separator in "[0-9]{1,3}") {
            prop_assert_eq!(segment(&input, &separator).unwrap(), vec![input.as_str()]);
        }

        #[test]
        fn prop_spans_agree_with_segments(input in "[ab,é]{0,40}", separator in "[b,é]{1,2}") {
            let segmenter = Segmenter::new(&separator).unwrap();
            let from_spans: Vec<&str> = segmenter.spans(&input).map(|s| &input[s.range()]).collect();
            prop_assert_eq!(from_spans, segmenter.segment(&input));
        }
    }
}
