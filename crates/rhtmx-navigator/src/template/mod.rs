/// URI template compilation, matching and variable extraction
///
/// A template is compiled once into an anchored regular expression and then
/// reused for every navigation. Compiled templates are immutable.

pub mod pattern;
pub mod resolver;

pub use pattern::{parse_template, TemplatePart};
pub use resolver::UriTemplateResolver;

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

use crate::error::{NavigatorError, Result};

/// Expression used for variables without a custom pattern
const DEFAULT_VARIABLE_PATTERN: &str = "[^/]+";

/// A compiled URI template such as `apples/{appleId}/cores/{coreId}`
///
/// # Examples
///
/// ```
/// use rhtmx_navigator::UriTemplate;
///
/// let template = UriTemplate::compile("a/{p}/b/{q}").unwrap();
/// assert!(template.matches("a/1/b/2"));
///
/// let vars = template.extract("a/1/b/2").unwrap();
/// assert_eq!(vars.get("p"), Some("1"));
/// assert_eq!(vars.get("q"), Some("2"));
/// ```
#[derive(Debug, Clone)]
pub struct UriTemplate {
    source: String,
    parts: Vec<TemplatePart>,
    /// One entry per variable occurrence, in template order
    variable_names: Vec<String>,
    regex: Regex,
}

impl UriTemplate {
    /// Compiles a template, failing with `InvalidTemplate` on malformed syntax
    pub fn compile(template: &str) -> Result<Self> {
        let parts = parse_template(template)?;

        let mut expression = String::from("^");
        let mut variable_names = Vec::new();

        for part in &parts {
            match part {
                TemplatePart::Literal(text) => expression.push_str(&regex::escape(text)),
                TemplatePart::Variable { name, pattern } => {
                    let pattern = pattern.as_deref().unwrap_or(DEFAULT_VARIABLE_PATTERN);
                    // Synthetic group names keep indexes stable even when a
                    // custom pattern carries its own groups or a name repeats.
                    expression.push_str(&format!(
                        "(?P<v{}>{})",
                        variable_names.len(),
                        pattern
                    ));
                    variable_names.push(name.clone());
                }
            }
        }
        expression.push('$');

        let regex = Regex::new(&expression)
            .map_err(|e| NavigatorError::invalid_template(template, e.to_string()))?;

        Ok(Self {
            source: template.to_string(),
            parts,
            variable_names,
            regex,
        })
    }

    /// The template string this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Distinct variable names in order of first appearance
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.variable_names.len());
        for name in &self.variable_names {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// Checks whether `candidate` conforms to the template
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Extracts variable values from a conforming candidate
    ///
    /// Fails with `NoMatch` if the candidate does not conform. When a name
    /// occurs more than once, its position is the first occurrence and its
    /// value the last capture.
    pub fn extract(&self, candidate: &str) -> Result<TemplateVariables> {
        let captures = self
            .regex
            .captures(candidate)
            .ok_or_else(|| NavigatorError::NoMatch {
                template: self.source.clone(),
                candidate: candidate.to_string(),
            })?;

        let mut variables = TemplateVariables::new();
        for (index, name) in self.variable_names.iter().enumerate() {
            if let Some(value) = captures.name(&format!("v{}", index)) {
                variables.insert(name.clone(), value.as_str().to_string());
            }
        }
        Ok(variables)
    }

    /// Builds a concrete state string by substituting `variables`
    ///
    /// Fails with `InvalidArgument` when a variable has no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_navigator::UriTemplate;
    /// use std::collections::HashMap;
    ///
    /// let template = UriTemplate::compile("apples/{appleId}").unwrap();
    /// let vars = HashMap::from([("appleId".to_string(), "7".to_string())]);
    /// assert_eq!(template.expand(&vars).unwrap(), "apples/7");
    /// ```
    pub fn expand(&self, variables: &HashMap<String, String>) -> Result<String> {
        self.parts.iter().try_fold(String::new(), |mut acc, part| {
            match part {
                TemplatePart::Literal(text) => acc.push_str(text),
                TemplatePart::Variable { name, .. } => {
                    let value = variables.get(name).ok_or_else(|| {
                        NavigatorError::InvalidArgument(format!(
                            "no value for variable '{}' of template '{}'",
                            name, self.source
                        ))
                    })?;
                    acc.push_str(value);
                }
            }
            Ok(acc)
        })
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Variables captured from a state string, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVariables {
    entries: Vec<(String, String)>,
}

impl TemplateVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, keeping the original position of an existing name
    pub fn insert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|entry| entry.0 == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.0 == name)
            .map(|entry| entry.1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn into_hash_map(self) -> HashMap<String, String> {
        self.entries.into_iter().collect()
    }
}
