use tracing::{debug, trace};

use crate::capture::{Capture, Scope, Variable};
use crate::decoder::{Decoder, HierEvent};
use crate::error::{Error, Result};
use crate::hierarchy::tree::{NodeId, ScopeTree};
use crate::types::Timescale;

/// Reads header metadata and the scope hierarchy, then flattens the subtree
/// anchored at `scope` into a capture.
///
/// An empty `scope` selects the first scope encountered (the root); a
/// non-empty name must match a scope name exactly, and the first match wins.
/// Variable names are prefixed with their full ancestor path so homonymous
/// signals in sibling scopes stay distinct.
pub fn read_hierarchy<D: Decoder>(decoder: &mut D, scope: &str) -> Result<Capture> {
    let mut capture = Capture::new();
    capture.set_start_time(decoder.start_time());
    capture.set_end_time(decoder.end_time());
    debug!(
        start = decoder.start_time(),
        end = decoder.end_time(),
        "simulation time range"
    );

    let timescale = Timescale::from_magnitude(decoder.timescale_magnitude())?;
    debug!(unit = %timescale.unit, seconds_per_tick = timescale.seconds_per_tick(), "time scale");
    capture.set_timescale(timescale);
    capture.set_version(decoder.version().to_string());
    capture.set_date(decoder.date().to_string());
    debug!(var_count = decoder.var_count(), "capture declares variables");

    let mut tree = ScopeTree::new();
    let mut anchor: Option<NodeId> = None;
    // Visitor failures are stashed here and raised after the decoder returns;
    // nothing unwinds through the foreign iteration frame.
    let mut failure: Option<Error> = None;

    decoder.for_each_hier_event(&mut |event| {
        if failure.is_some() {
            return;
        }
        match event {
            HierEvent::ScopeBegin {
                kind,
                name,
                component,
            } => {
                trace!(scope = %name, "discovered scope");
                let is_anchor = anchor.is_none() && (scope.is_empty() || scope == name);
                match tree.push(Scope {
                    kind,
                    name,
                    component,
                    vars: Vec::new(),
                }) {
                    Ok(id) => {
                        if is_anchor {
                            debug!(node = id, "selected anchor scope");
                            anchor = Some(id);
                        }
                    }
                    Err(err) => failure = Some(err),
                }
            }
            HierEvent::ScopeEnd => tree.pop(),
            HierEvent::VarDecl {
                kind,
                name,
                length,
                handle,
                is_alias,
            } => {
                let name = format!("{}{}", tree.current_context(), name);
                trace!(var = %name, length, %handle, "discovered variable");
                match tree.current_mut() {
                    Some(current) => current.vars.push(Variable {
                        kind,
                        name,
                        length,
                        handle,
                        is_alias,
                    }),
                    None => failure = Some(Error::VarOutsideScope { name }),
                }
            }
            HierEvent::AttrBegin | HierEvent::AttrEnd => {}
        }
    })?;

    if let Some(err) = failure {
        return Err(err);
    }
    let Some(anchor) = anchor else {
        return Err(Error::ScopeNotFound {
            name: scope.to_string(),
        });
    };

    let anchor_node = tree.get(anchor)?;
    let descendants = tree.all_children(anchor)?;
    debug!(
        scope = %anchor_node.scope.name,
        child_scopes = descendants.len(),
        "flattening subtree"
    );
    let mut vars = anchor_node.scope.vars.clone();
    for node in descendants {
        vars.extend_from_slice(&node.scope.vars);
    }
    debug!(vars = vars.len(), "accumulated variables");
    capture.set_vars(vars);
    Ok(capture)
}
