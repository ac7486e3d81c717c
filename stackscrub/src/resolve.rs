//! Method-metadata resolution for raw frames.
//!
//! Turns one raw (method, file, line, column) descriptor into a populated
//! [`Frame`], including unwinding compiler-synthesized async/iterator step
//! methods back to the method the developer wrote. Resolution is total: every
//! raw frame yields a frame, degrading to the `"?"` sentinel instead of
//! failing.

use crate::frame::{ArgMode, Frame, MethodArg, TypeName};
use crate::metadata::MetadataTable;
use crate::snapshot::RawFrame;
use log::trace;

/// Resolve one raw frame against the metadata table.
pub(crate) fn resolve_frame(table: &MetadataTable, raw: &RawFrame, raw_index: usize) -> Frame {
    let mut frame = Frame {
        file_path: raw.file_path.clone(),
        line_number: raw.line_number,
        column_number: raw.column_number,
        raw_index: Some(raw_index),
        ..Frame::default()
    };

    let Some(method_id) = raw.method else {
        return frame;
    };

    // The declaring type stays on the frame even when the step method below
    // unwinds: filters match on what the runtime actually reported, and the
    // synthesized type name pinpoints the state machine in logs.
    if let Some(declaring) = table.method(method_id).declaring_type {
        frame.containing_type = Some(TypeName {
            name: table.ty(declaring).name.clone(),
            namespace: table.namespace_of(declaring).map(str::to_owned),
            full_name: table.full_name(declaring),
        });
    }

    let resolved_id = table.originating_method(method_id);
    if resolved_id != method_id {
        trace!(
            "unwound state-machine step to {}",
            table.method(resolved_id).name
        );
    }

    let method = table.method(resolved_id);
    frame.method_name = method.name.clone();

    for &generic in &method.generic_params {
        // Generic parameter identifiers are not kept by every host, so they
        // render under a fixed placeholder name.
        frame.generic_arguments.push(MethodArg {
            name: "T".to_owned(),
            type_name: table.display_name(generic),
            type_id: Some(generic),
            mode: ArgMode::Value,
        });
    }

    for param in &method.params {
        let mode = if param.out_param {
            ArgMode::Out
        } else if table.ty(param.ty).by_ref {
            ArgMode::Ref
        } else {
            ArgMode::Value
        };
        // Plain ref parameters display the referenced type; out parameters
        // keep the declared by-ref type, trailing marker and all.
        let shown = match mode {
            ArgMode::Ref => table.ty(param.ty).element.unwrap_or(param.ty),
            ArgMode::Out | ArgMode::Value => param.ty,
        };
        frame.parameters.push(MethodArg {
            name: param.name.clone().unwrap_or_else(|| "?".to_owned()),
            type_name: table.display_name(shown),
            type_id: Some(shown),
            mode,
        });
    }

    frame
}
