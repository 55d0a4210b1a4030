//! Filter operators and group conjunctions.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{AutotaskError, Result};

/// Comparison operator of a filter condition.
///
/// The wire spelling is fixed by the Autotask query endpoint and matched
/// exactly when parsed, with one exception: the existence operators are
/// recognized in any case (see [`Operator::parse`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Operator {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "noteq")]
    NotEq,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "gte")]
    Gte,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notIn")]
    NotIn,
    #[serde(rename = "exist")]
    Exist,
    #[serde(rename = "notExist")]
    NotExist,
    #[serde(rename = "beginsWith")]
    BeginsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "contains")]
    Contains,
}

impl Operator {
    /// Every operator accepted by the query endpoint.
    pub const ALL: [Operator; 13] = [
        Operator::Eq,
        Operator::NotEq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::NotIn,
        Operator::Exist,
        Operator::NotExist,
        Operator::BeginsWith,
        Operator::EndsWith,
        Operator::Contains,
    ];

    /// The wire spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::NotEq => "noteq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Exist => "exist",
            Operator::NotExist => "notExist",
            Operator::BeginsWith => "beginsWith",
            Operator::EndsWith => "endsWith",
            Operator::Contains => "contains",
        }
    }

    /// Whether the operator takes no value.
    pub fn is_unary(self) -> bool {
        matches!(self, Operator::Exist | Operator::NotExist)
    }

    /// Parse an existence operator, ignoring ASCII case.
    pub fn parse_unary(s: &str) -> Option<Existence> {
        if s.eq_ignore_ascii_case("exist") {
            Some(Existence::Exist)
        } else if s.eq_ignore_ascii_case("notexist") {
            Some(Existence::NotExist)
        } else {
            None
        }
    }

    /// Parse an operator as given to the `where` family of methods.
    ///
    /// Existence operators match case-insensitively and are normalized to
    /// their canonical spelling. All other operators must match the
    /// whitelist exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidOperator`] for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        match Self::parse_unary(s) {
            Some(existence) => Ok(existence.into()),
            None => s.parse(),
        }
    }
}

impl FromStr for Operator {
    type Err = AutotaskError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AutotaskError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value-less subset of [`Operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Existence {
    Exist,
    NotExist,
}

impl From<Existence> for Operator {
    fn from(existence: Existence) -> Self {
        match existence {
            Existence::Exist => Operator::Exist,
            Existence::NotExist => Operator::NotExist,
        }
    }
}

/// Boolean combinator of a filter group.
///
/// Serialized as `"AND"`/`"OR"`; parsed in any case, from strings and from
/// JSON alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum Conjunction {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Conjunction {
    /// The wire spelling of this conjunction.
    pub fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

impl FromStr for Conjunction {
    type Err = AutotaskError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("and") {
            Ok(Conjunction::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Conjunction::Or)
        } else {
            Err(AutotaskError::InvalidConjunction(s.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for Conjunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_whitelist_round_trips() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
            assert_eq!(
                serde_json::to_string(&op).unwrap(),
                format!("\"{}\"", op.as_str())
            );
        }
    }

    #[test]
    fn test_operator_whitelist_is_case_sensitive() {
        assert!(matches!(
            "EQ".parse::<Operator>(),
            Err(AutotaskError::InvalidOperator(s)) if s == "EQ"
        ));
        assert!("notin".parse::<Operator>().is_err());
        assert!("notEq".parse::<Operator>().is_err());
        assert!("NOTEXIST".parse::<Operator>().is_err());
    }

    #[test]
    fn test_parse_accepts_existence_in_any_case() {
        assert_eq!(Operator::parse("NOTEXIST").unwrap(), Operator::NotExist);
        assert_eq!(Operator::parse("notexist").unwrap(), Operator::NotExist);
        assert_eq!(Operator::parse("Exist").unwrap(), Operator::Exist);
        assert_eq!(Operator::parse("beginsWith").unwrap(), Operator::BeginsWith);
        assert!(Operator::parse("BEGINSWITH").is_err());
    }

    #[test]
    fn test_unary_operators() {
        let unary: Vec<_> = Operator::ALL.into_iter().filter(|op| op.is_unary()).collect();
        assert_eq!(unary, vec![Operator::Exist, Operator::NotExist]);
    }

    #[test]
    fn test_conjunction_parse() {
        assert_eq!("and".parse::<Conjunction>().unwrap(), Conjunction::And);
        assert_eq!("Or".parse::<Conjunction>().unwrap(), Conjunction::Or);
        assert!(matches!(
            "xor".parse::<Conjunction>(),
            Err(AutotaskError::InvalidConjunction(_))
        ));
    }

    #[test]
    fn test_conjunction_wire_spelling() {
        assert_eq!(serde_json::to_string(&Conjunction::Or).unwrap(), "\"OR\"");
        let parsed: Conjunction = serde_json::from_str("\"and\"").unwrap();
        assert_eq!(parsed, Conjunction::And);
    }

    #[test]
    fn test_conjunction_deserialize_matches_parse() {
        for (input, expected) in [("\"Or\"", Conjunction::Or), ("\"aNd\"", Conjunction::And)] {
            let parsed: Conjunction = serde_json::from_str(input).unwrap();
            assert_eq!(parsed, expected);
        }
        assert!(serde_json::from_str::<Conjunction>("\"xor\"").is_err());
    }
}
