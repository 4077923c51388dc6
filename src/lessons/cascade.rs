//! Ordered extraction rules
//!
//! A cascade is a list of named rules evaluated in order against the same
//! input. The first rule producing a non-empty (trimmed) value wins. Rules are
//! independent closures so a new fallback can be slotted in without touching
//! the others.

/// A rule extracts a candidate value from the input, or misses
type Extractor = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A single named extraction rule
pub struct Rule {
    name: &'static str,
    extract: Extractor,
}

impl Rule {
    pub fn new<F>(name: &'static str, extract: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name,
            extract: Box::new(extract),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Value produced by the winning rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: &'static str,
    pub value: String,
}

/// Ordered list of rules, first success wins
#[derive(Default)]
pub struct Cascade {
    rules: Vec<Rule>,
}

impl Cascade {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule at the lowest priority
    pub fn rule<F>(mut self, name: &'static str, extract: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(name, extract));
        self
    }

    /// Names of the rules in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Run the rules in order and return the first non-empty trimmed value
    pub fn first_match(&self, input: &str) -> Option<RuleMatch> {
        for rule in &self.rules {
            let Some(raw) = (rule.extract)(input) else {
                continue;
            };
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }
            log::debug!("Cascade rule '{}' matched: {:?}", rule.name, value);
            return Some(RuleMatch {
                rule: rule.name,
                value: value.to_string(),
            });
        }
        None
    }
}
