//! Command implementations
//!
//! Each command writes to the given output so it can run against a buffer.

use std::io::Write;
use std::path::Path;

use x3d_core::{EditorRegistry, ExportOptions, SchemaCatalog, parse_document, parse_edit};

use crate::config::ConfigManager;
use crate::error::CliError;

pub fn catalog(catalog: &SchemaCatalog, out: &mut dyn Write) -> Result<(), CliError> {
    for node_type in catalog.iter() {
        writeln!(
            out,
            "{:<28} {} attributes{}",
            node_type.element_name,
            node_type.attributes.len(),
            if node_type.content { ", body" } else { "" }
        )?;
    }
    Ok(())
}

pub fn describe(catalog: &SchemaCatalog, element: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let node_type = catalog
        .get(element)
        .ok_or_else(|| CliError::UnknownElement(element.to_string()))?;

    writeln!(out, "<{}>", node_type.element_name)?;
    for spec in &node_type.attributes {
        let mut flags = Vec::new();
        if spec.required {
            flags.push("required".to_string());
        }
        if let Some(normalizer) = spec.normalizer {
            flags.push(format!("{:?}", normalizer));
        }
        writeln!(
            out,
            "  {:<20} {:<8} default='{}'{}",
            spec.name,
            spec.value_type,
            spec.default,
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            }
        )?;
    }
    Ok(())
}

pub fn normalize(
    catalog: &SchemaCatalog,
    file: &Path,
    options: &ExportOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let text = std::fs::read_to_string(file)?;
    let bound = parse_document(&text, catalog)?;
    tracing::info!("{} bindable elements in {:?}", bound.len(), file);

    for node in &bound {
        writeln!(out, "{}: {}", node.path, node.instance.to_element(options))?;
    }
    Ok(())
}

pub fn set(
    catalog: &SchemaCatalog,
    editors: &EditorRegistry,
    element: &str,
    edits: &[String],
    options: &ExportOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut node = catalog
        .instantiate(element)
        .ok_or_else(|| CliError::UnknownElement(element.to_string()))?;
    let mut editor = editors.editor_for(element);

    for edit in edits {
        let (name, value) = parse_edit(edit).ok_or_else(|| CliError::InvalidEdit(edit.clone()))?;
        if !editor.apply(&mut node, name, value)? {
            tracing::debug!("'{}' left {} unchanged", edit, name);
        }
    }

    writeln!(out, "{}", node.to_element(options))?;
    Ok(())
}

pub fn config(manager: &ConfigManager, write: bool, out: &mut dyn Write) -> Result<(), CliError> {
    if write {
        manager.save()?;
    }
    writeln!(out, "# {}", manager.config_file_path().display())?;
    writeln!(out, "{}", manager.to_ron_string()?)?;
    Ok(())
}
