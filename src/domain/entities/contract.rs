//! Contract interface whitelist

/// Whether an entry point only reads state or mutates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    View,
    Change,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Change => "change",
        }
    }
}

/// The callable entry points of a deployed contract.
///
/// Anything not listed here is refused before a request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterface {
    view_methods: Vec<String>,
    change_methods: Vec<String>,
}

impl ContractInterface {
    pub fn new<V, C>(view_methods: V, change_methods: C) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            view_methods: view_methods.into_iter().map(Into::into).collect(),
            change_methods: change_methods.into_iter().map(Into::into).collect(),
        }
    }

    /// Interface of the tokenized card NFT contract
    pub fn tokenized_card() -> Self {
        Self::new(
            [
                "nft_metadata",
                "nft_total_supply",
                "nft_tokens_for_owner",
                "nft_token",
            ],
            ["new", "buy"],
        )
    }

    /// Kind of `method`, or `None` if it is not exposed
    pub fn kind_of(&self, method: &str) -> Option<MethodKind> {
        if self.view_methods.iter().any(|m| m == method) {
            Some(MethodKind::View)
        } else if self.change_methods.iter().any(|m| m == method) {
            Some(MethodKind::Change)
        } else {
            None
        }
    }

    pub fn view_methods(&self) -> &[String] {
        &self.view_methods
    }

    pub fn change_methods(&self) -> &[String] {
        &self.change_methods
    }
}
