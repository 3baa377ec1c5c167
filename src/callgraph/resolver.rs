//! Pass 4 - call-site resolution (§4.5): turn each [`RawCallSite`] into a
//! [`CallSite`] with a resolved callee FQN, or an [`UnresolvedReason`] when
//! resolution can't pin down exactly one candidate.

use crate::extractor::RawCallSite;
use crate::inference::context::CallableIndex;
use crate::type_store::TypeStore;
use crate::ty::Type;

use super::graph::{CallSite, UnresolvedReason};

/// Resolve one raw call site. `receiver_class` is `Some` when the callee
/// text is `receiver.method` and the receiver's class was already known
/// (from the type store) at the point this call site was recorded.
pub fn resolve_call_site(
    raw: &RawCallSite,
    callables: &CallableIndex,
    types: &TypeStore,
) -> CallSite {
    let resolved = if let Some((receiver, method)) = raw.callee_text.rsplit_once('.') {
        resolve_method_call(raw, receiver, method, callables, types)
    } else {
        resolve_plain_call(raw, &raw.callee_text, callables)
    };

    match resolved {
        Ok(callee) => CallSite {
            caller: raw.caller_qualified_name.clone(),
            callee: Some(callee),
            unresolved_reason: None,
            location: raw.location,
        },
        Err(reason) => CallSite {
            caller: raw.caller_qualified_name.clone(),
            callee: None,
            unresolved_reason: Some(reason),
            location: raw.location,
        },
    }
}

fn resolve_plain_call(
    raw: &RawCallSite,
    name: &str,
    callables: &CallableIndex,
) -> Result<String, UnresolvedReason> {
    let candidates = callables.function_candidates(name);
    match candidates.len() {
        0 => Err(UnresolvedReason::NoMatchingFunction),
        1 => Ok(candidates[0].qualified_name.clone()),
        _ => {
            // Prefer a candidate already in the same module as the caller;
            // otherwise this genuinely is ambiguous.
            let caller_module = raw
                .caller_qualified_name
                .rsplit_once('.')
                .map(|(module, _)| module)
                .unwrap_or(&raw.caller_qualified_name);
            let same_module: Vec<_> = candidates
                .iter()
                .filter(|f| f.qualified_name.starts_with(caller_module))
                .collect();
            match same_module.len() {
                1 => Ok(same_module[0].qualified_name.clone()),
                _ => Err(UnresolvedReason::AmbiguousCandidates),
            }
        }
    }
}

fn resolve_method_call(
    _raw: &RawCallSite,
    receiver: &str,
    method: &str,
    callables: &CallableIndex,
    types: &TypeStore,
) -> Result<String, UnresolvedReason> {
    let receiver_class = match receiver {
        "self" | "this" => types
            .get_variable(_raw_function(_raw), "self")
            .and_then(class_fqn_of),
        _ => types
            .get_variable(_raw_function(_raw), receiver)
            .and_then(class_fqn_of),
    };
    let Some(class_fqn) = receiver_class else {
        return Err(UnresolvedReason::ReceiverTypeUnknown);
    };

    let candidates = callables.function_candidates(method);
    let matching: Vec<_> = candidates
        .iter()
        .filter(|f| f.qualified_name == format!("{class_fqn}.{method}"))
        .collect();
    match matching.len() {
        1 => Ok(matching[0].qualified_name.clone()),
        0 => Err(UnresolvedReason::NoMatchingFunction),
        _ => Err(UnresolvedReason::AmbiguousCandidates),
    }
}

fn _raw_function(raw: &RawCallSite) -> &str {
    &raw.caller_qualified_name
}

fn class_fqn_of(info: crate::ty::TypeInfo) -> Option<String> {
    match info.ty {
        Type::Concrete(fqn) => Some(fqn),
        _ => None,
    }
}
