//! Buckets a signature's parameters by calling convention.
//!
//! Derived once per invocation cycle and treated as immutable from
//! then on. Declaration order is preserved within each bucket, and
//! `Signature` guarantees bucket concatenation equals declaration
//! order overall.

use std::collections::HashSet;

use crate::core::signature::{ParamKind, ParameterSpec, Signature};

#[derive(Debug, Clone)]
pub struct Classification {
    positional_only: Vec<ParameterSpec>,
    positional_or_keyword: Vec<ParameterSpec>,
    keyword_only: Vec<ParameterSpec>,
    required: HashSet<String>,
}

impl Classification {
    /// Single pass over the signature: bucket by kind, record
    /// default-less parameters in the required set. Nothing is
    /// dropped, reordered, or duplicated.
    pub fn classify(signature: &Signature) -> Self {
        let mut classification = Classification {
            positional_only: Vec::new(),
            positional_or_keyword: Vec::new(),
            keyword_only: Vec::new(),
            required: HashSet::new(),
        };
        for param in signature.params() {
            if param.is_required() {
                classification.required.insert(param.name.clone());
            }
            match param.kind {
                ParamKind::PositionalOnly => classification.positional_only.push(param.clone()),
                ParamKind::PositionalOrKeyword => {
                    classification.positional_or_keyword.push(param.clone())
                }
                ParamKind::KeywordOnly => classification.keyword_only.push(param.clone()),
            }
        }
        classification
    }

    pub fn positional_only(&self) -> &[ParameterSpec] {
        &self.positional_only
    }

    pub fn positional_or_keyword(&self) -> &[ParameterSpec] {
        &self.positional_or_keyword
    }

    pub fn keyword_only(&self) -> &[ParameterSpec] {
        &self.keyword_only
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn required_names(&self) -> &HashSet<String> {
        &self.required
    }

    /// All parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.positional_only
            .iter()
            .chain(self.positional_or_keyword.iter())
            .chain(self.keyword_only.iter())
    }
}
