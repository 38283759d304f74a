use crate::document::{BlockId, BlockKind};
use crate::lorem::{
    DEFAULT_COUNT, GenerationRequest, LengthSource, LoremError, MAX_COUNT, RandomLengths, Units,
    generate,
};

use super::{Attributes, BlockFactory, BlockMacro, MacroError, MacroRegistry};

/// Block macro expanding `lorem::<units>[num=<count>]` into an emphasized
/// paragraph of placeholder text.
pub struct LoremMacro {
    default_count: usize,
    lengths: Box<dyn LengthSource>,
}

impl LoremMacro {
    pub const NAME: &'static str = "lorem";

    pub fn new(default_count: usize, lengths: Box<dyn LengthSource>) -> Self {
        Self {
            default_count,
            lengths,
        }
    }

    /// Resolve the invocation into a generation request.
    ///
    /// `num` is read by its leading integer, so `2.5` means 2 and `5abc`
    /// means 5. Without a leading integer it falls back to the default count.
    /// Negative counts and counts above [`MAX_COUNT`] are rejected.
    pub fn request(
        &self,
        target: &str,
        attrs: &Attributes,
    ) -> Result<GenerationRequest, LoremError> {
        let units: Units = target.parse()?;
        let count = match attrs.get("num") {
            None => self.default_count,
            Some(raw) => match parse_count(raw)? {
                Some(count) => count,
                None => {
                    log::warn!(
                        "Ignoring non-numeric num '{raw}', using {} sentences",
                        self.default_count
                    );
                    self.default_count
                }
            },
        };
        Ok(GenerationRequest { count, units })
    }
}

/// Leading optionally-signed integer of `raw`, ignoring surrounding
/// whitespace. `Ok(None)` when there are no leading digits.
fn parse_count(raw: &str) -> Result<Option<usize>, LoremError> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return Ok(None);
    }

    let invalid = || LoremError::InvalidCount(raw.trim().to_string());
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(invalid());
    }
    match digits.parse::<usize>() {
        Ok(count) if count <= MAX_COUNT => Ok(Some(count)),
        _ => Err(invalid()),
    }
}

impl Default for LoremMacro {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT, Box::new(RandomLengths::thread()))
    }
}

impl BlockMacro for LoremMacro {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(
        &mut self,
        factory: &mut dyn BlockFactory,
        parent: BlockId,
        target: &str,
        attrs: &Attributes,
    ) -> Result<BlockId, MacroError> {
        let request = self.request(target, attrs)?;
        log::debug!("Generating {} {}", request.count, request.units);
        let text = generate(request, &mut *self.lengths);
        Ok(factory.create_block(parent, BlockKind::Paragraph, format!("_{text}_")))
    }
}

/// Install the `lorem` block macro into `registry`.
pub fn register_lorem(
    registry: &mut MacroRegistry,
    default_count: usize,
    lengths: Box<dyn LengthSource>,
) {
    registry.register(Box::new(LoremMacro::new(default_count, lengths)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::lorem::FixedLengths;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn fixed_macro() -> LoremMacro {
        LoremMacro::new(DEFAULT_COUNT, Box::new(FixedLengths::new([5.0]).unwrap()))
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_two_sentences_wrapped_in_paragraph() {
        let mut doc = Document::new();
        let root = doc.root();
        let id = fixed_macro()
            .process(&mut doc, root, "sentences", &attrs(&[("num", "2")]))
            .unwrap();

        let block = doc.block(id);
        assert_eq!(block.kind, BlockKind::Paragraph);
        assert_eq!(block.parent, Some(root));
        assert_eq!(
            block.content,
            "_Lorem ipsum dolor sit amet. Lorem ipsum dolor sit amet._"
        );
    }

    #[test]
    fn test_random_lengths_still_wrapped() {
        let mut doc = Document::new();
        let root = doc.root();
        let id = LoremMacro::default()
            .process(&mut doc, root, "sentences", &attrs(&[("num", "2")]))
            .unwrap();

        let content = &doc.block(id).content;
        assert!(content.starts_with("_Lorem "));
        assert!(content.ends_with("._"));
        assert_eq!(content.matches('.').count(), 2);
    }

    #[rstest]
    #[case(&[], 3)]
    #[case(&[("num", "7")], 7)]
    #[case(&[("num", " 4 ")], 4)]
    #[case(&[("num", "0")], 0)]
    #[case(&[("num", "many")], 3)]
    #[case(&[("num", "")], 3)]
    #[case(&[("num", "2.5")], 2)]
    #[case(&[("num", "5abc")], 5)]
    #[case(&[("num", "+6")], 6)]
    #[case(&[("num", "-0")], 0)]
    #[case(&[("num", ".5")], 3)]
    #[case(&[("num", "-x")], 3)]
    #[case(&[("num", "10000")], 10_000)]
    fn test_count_resolution(#[case] pairs: &[(&str, &str)], #[case] expected: usize) {
        let request = fixed_macro().request("sentences", &attrs(pairs)).unwrap();
        assert_eq!(request, GenerationRequest::sentences(expected));
    }

    #[test]
    fn test_configured_default_count() {
        let lorem = LoremMacro::new(5, Box::new(FixedLengths::new([5.0]).unwrap()));
        let request = lorem.request("sentences", &Attributes::new()).unwrap();
        assert_eq!(request.count, 5);
    }

    #[rstest]
    #[case("-2")]
    #[case("-2.5")]
    #[case("10001")]
    #[case("1000000000000")]
    #[case("99999999999999999999")]
    fn test_out_of_range_count_rejected(#[case] num: &str) {
        let err = fixed_macro()
            .request("sentences", &attrs(&[("num", num)]))
            .unwrap_err();
        assert_eq!(err, LoremError::InvalidCount(num.to_string()));
    }

    #[test]
    fn test_unsupported_units_create_no_block() {
        let mut doc = Document::new();
        let root = doc.root();
        let err = fixed_macro()
            .process(&mut doc, root, "paragraphs", &Attributes::new())
            .unwrap_err();

        assert_eq!(
            err,
            MacroError::Lorem(LoremError::UnsupportedUnits("paragraphs".to_string()))
        );
        assert!(doc.is_empty());
    }

    #[test]
    fn test_zero_sentences_is_bare_delimiters() {
        let mut doc = Document::new();
        let root = doc.root();
        let id = fixed_macro()
            .process(&mut doc, root, "sentences", &attrs(&[("num", "0")]))
            .unwrap();
        assert_eq!(doc.block(id).content, "__");
    }

    #[test]
    fn test_register_lorem() {
        let mut registry = MacroRegistry::new();
        register_lorem(&mut registry, 3, Box::new(FixedLengths::new([5.0]).unwrap()));
        assert_eq!(registry.names(), vec!["lorem"]);
    }
}
