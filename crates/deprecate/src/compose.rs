//! Notice text composition

use crate::hint::ReplacementHint;
use crate::resolver::Identity;
use crate::version::VersionPair;

/// Build the notice sentence for `identity`
///
/// `{subject} is deprecated[ since {since} and will be removed in {removed}].[ {hint}]`
pub fn compose(
    identity: &Identity,
    version: Option<&VersionPair>,
    hint: Option<&ReplacementHint>,
) -> String {
    let mut message = format!("{} is deprecated", identity);

    match version {
        Some(version) => {
            message.push(' ');
            message.push_str(&version.to_string());
            message.push('.');
        }
        None => message.push('.'),
    }

    if let Some(hint) = hint {
        message.push(' ');
        message.push_str(&hint.render());
    }

    message
}
