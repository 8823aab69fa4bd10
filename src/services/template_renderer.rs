//! 模板渲染服务 - 业务能力层
//!
//! 只负责"把字段映射填入一个 docx 模板"，不关心模板从哪里来、结果写到哪里去。

use std::io::{Cursor, Read, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{PlaceholderError, RenderError};
use crate::models::FieldMapping;
use crate::services::docx_xml;

/// 正文部分
const DOCUMENT_PART: &str = "word/document.xml";

/// 渲染选项
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// 严格模式：模板中的占位符在字段映射里不存在时报错；
    /// 关闭后未知占位符渲染为空字符串。多余的映射字段始终允许。
    pub strict: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// 渲染模板
///
/// # 参数
/// - `template`: docx 模板的原始字节
/// - `fields`: 占位符映射
/// - `options`: 渲染选项
///
/// # 返回
/// 返回生成的 docx 字节；模板中所有的占位符错误会汇总到一个 [`RenderError`] 中
pub fn render_template(
    template: &[u8],
    fields: &FieldMapping,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let mut archive = ZipArchive::new(Cursor::new(template)).map_err(|e| {
        RenderError::single(PlaceholderError::InvalidArchive {
            reason: e.to_string(),
        })
    })?;

    if archive.by_name(DOCUMENT_PART).is_err() {
        return Err(RenderError::single(PlaceholderError::MissingPart {
            part: DOCUMENT_PART.to_string(),
        }));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut errors = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(invalid_archive)?;
        let name = entry.name().to_string();

        if !is_text_part(&name) {
            writer.raw_copy_file(entry).map_err(write_failed)?;
            continue;
        }

        let mut raw = Vec::new();
        entry.read_to_end(&mut raw).map_err(invalid_archive)?;
        let xml = match String::from_utf8(raw) {
            Ok(xml) => xml,
            Err(_) => {
                errors.push(PlaceholderError::InvalidEncoding { part: name });
                continue;
            }
        };

        let rendered = docx_xml::render_part(&xml, &name, fields, options.strict, &mut errors);
        debug!("已渲染模板部分: {} ({} 字节)", name, rendered.len());

        writer
            .start_file(name.as_str(), file_options)
            .map_err(write_failed)?;
        writer.write_all(rendered.as_bytes()).map_err(write_failed)?;
    }

    if !errors.is_empty() {
        return Err(RenderError { errors });
    }

    let cursor = writer.finish().map_err(write_failed)?;
    Ok(cursor.into_inner())
}

/// 需要做占位符替换的 XML 部分
fn is_text_part(name: &str) -> bool {
    if name == DOCUMENT_PART || name == "word/footnotes.xml" || name == "word/endnotes.xml" {
        return true;
    }
    (name.starts_with("word/header") || name.starts_with("word/footer")) && name.ends_with(".xml")
}

fn invalid_archive(e: impl std::fmt::Display) -> RenderError {
    RenderError::single(PlaceholderError::InvalidArchive {
        reason: e.to_string(),
    })
}

fn write_failed(e: impl std::fmt::Display) -> RenderError {
    RenderError::single(PlaceholderError::WriteFailed {
        reason: e.to_string(),
    })
}
