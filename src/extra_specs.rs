//! A small port of `nova.scheduler.filters.extra_specs_ops.match`: the
//! operator grammar `extra_specs` values are allowed to carry (`==`,
//! `s==`, `<in>`, `>=`, `<=`, bare equality as the default). Shared by every
//! constraint that compares a requested `extra_specs`/metadata value
//! against something a host or aggregate advertises.
//!
//! Only the operators actually exercised by this engine's constraint
//! catalogue are implemented; anything else falls back to plain string
//! equality rather than failing closed.

/// Whether `actual` satisfies the `extra_specs`-style requirement `req`.
pub fn match_extra_spec(actual: &str, req: &str) -> bool {
    let req = req.trim();
    if let Some(rest) = req.strip_prefix("s==") {
        return actual == rest.trim();
    }
    if let Some(rest) = req.strip_prefix("s!=") {
        return actual != rest.trim();
    }
    if let Some(rest) = req.strip_prefix("<in>") {
        return rest.trim().contains(actual);
    }
    if let Some(rest) = req.strip_prefix(">=") {
        return match (actual.trim().parse::<f64>(), rest.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => a >= b,
            _ => false,
        };
    }
    if let Some(rest) = req.strip_prefix("<=") {
        return match (actual.trim().parse::<f64>(), rest.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => a <= b,
            _ => false,
        };
    }
    if let Some(rest) = req.strip_prefix("==") {
        return actual.trim() == rest.trim();
    }
    actual.trim() == req
}

/// Strips a `<scope>:` prefix from an `extra_specs` key if it matches
/// `scope`; keys with a different namespace prefix don't apply to this
/// constraint (returns `None`), unscoped keys apply to everyone.
pub fn strip_scope<'a>(key: &'a str, scope: &str) -> Option<&'a str> {
    match key.split_once(':') {
        Some((ns, rest)) => {
            if ns == scope {
                Some(rest)
            } else {
                None
            }
        }
        None => Some(key),
    }
}
