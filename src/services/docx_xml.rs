//! docx XML 部分的占位符替换
//!
//! 以段落（`<w:p>`）为单位处理：先把段落内所有 `<w:t>` 的文本拼接起来再解析标签，
//! 因此被 Word 拆分到多个 run 里的占位符也能识别。替换后的文字写回原来所在的 run，
//! 保留各 run 的格式。
//!
//! 支持的标签：
//! - `{key}`：替换为字段值，值中的换行转换为 `<w:br/>`
//! - `{#key}` … `{/key}`：字段值非空时保留中间内容
//! - `{^key}` … `{/key}`：字段值为空时保留中间内容
//!
//! 区块标签可以跨段落；只包含区块标签的段落会整段删除。
//! 段落之外的结构（表格框架、分节符等）始终保留，删除段落后变空的表格单元格
//! 会补一个空段落。
//!
//! 文本框（`w:txbxContent`）中的段落嵌套在外层段落里，按标签深度匹配段落边界；
//! 嵌套段落在外层段落自身的文字之后处理。

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::PlaceholderError;
use crate::models::FieldMapping;

/// `<w:p …>`、`</w:p>` 和自闭合的 `<w:p/>`
static PARAGRAPH_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)w:p(?:\s[^>]*?)?(/?)>").expect("段落标签正则表达式不合法")
});

/// 单元格和段落标签
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)w:(tc|p)(?:\s[^>]*?)?(/?)>").expect("单元格标签正则表达式不合法")
});

static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*[^/>])?>(.*?)</w:t>").expect("文本正则表达式不合法")
});

const LINE_BREAK: &str = r#"</w:t><w:br/><w:t xml:space="preserve">"#;

const EMPTY_PARAGRAPH: &str = "<w:p/>";

/// 错误信息中展示的片段长度
const FRAGMENT_LEN: usize = 20;

/// 单个 XML 部分的渲染上下文
struct PartRenderer<'a> {
    part: &'a str,
    fields: &'a FieldMapping,
    strict: bool,
    errors: &'a mut Vec<PlaceholderError>,
    sections: Vec<Section>,
}

struct Section {
    name: String,
    visible: bool,
}

struct TextRun {
    /// 整个 `<w:t>…</w:t>` 元素在段落 XML 中的位置
    range: Range<usize>,
    text: String,
}

#[derive(Debug, PartialEq)]
enum Token {
    Text { start: usize, end: usize },
    Placeholder { name: String, start: usize },
    Open { name: String, inverted: bool },
    Close { name: String },
}

/// 渲染一个 XML 部分，错误追加到 `errors`
pub fn render_part(
    xml: &str,
    part: &str,
    fields: &FieldMapping,
    strict: bool,
    errors: &mut Vec<PlaceholderError>,
) -> String {
    let mut renderer = PartRenderer {
        part,
        fields,
        strict,
        errors,
        sections: Vec::new(),
    };
    renderer.render(xml)
}

impl PartRenderer<'_> {
    fn render(&mut self, xml: &str) -> String {
        let mut out = String::with_capacity(xml.len());
        let mut last = 0;

        for span in paragraph_spans(xml, 0..xml.len()) {
            out.push_str(&xml[last..span.start]);
            if let Some(paragraph) = self.render_paragraph(&xml[span.clone()]) {
                out.push_str(&paragraph);
            }
            last = span.end;
        }
        out.push_str(&xml[last..]);
        let out = ensure_cell_paragraphs(&out);

        for section in std::mem::take(&mut self.sections) {
            self.errors.push(PlaceholderError::UnclosedSection {
                part: self.part.to_string(),
                name: section.name,
            });
        }

        out
    }

    fn visible(&self) -> bool {
        self.sections.iter().all(|s| s.visible)
    }

    /// 渲染一个段落，返回 `None` 表示整段删除
    fn render_paragraph(&mut self, xml: &str) -> Option<String> {
        // 外层段落的开始标签之后、结束标签之前可能嵌套文本框段落
        let body_start = xml.find('>').map_or(0, |i| i + 1);
        let body_end = xml.rfind("</w:p>").unwrap_or(xml.len()).max(body_start);
        let nested = paragraph_spans(xml, body_start..body_end);

        let runs: Vec<TextRun> = TEXT_RE
            .captures_iter(xml)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if nested.iter().any(|n| n.contains(&whole.start())) {
                    return None;
                }
                let inner = caps.get(1)?;
                Some(TextRun {
                    range: whole.range(),
                    text: unescape_xml(inner.as_str()),
                })
            })
            .collect();

        let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
        let visible_at_start = self.visible();

        let mut outputs: Option<Vec<String>> = None;
        let mut has_section_tag = false;
        let mut visible_content = false;

        if joined.contains(['{', '}']) {
            let mut rendered = vec![String::new(); runs.len()];
            for token in self.tokenize(&joined) {
                let visible = self.visible();
                match token {
                    Token::Text { start, end } => {
                        if visible {
                            if !joined[start..end].trim().is_empty() {
                                visible_content = true;
                            }
                            distribute(&runs, &joined, start..end, &mut rendered);
                        }
                    }
                    Token::Placeholder { name, start } => {
                        let value = self.lookup(&name);
                        if visible {
                            visible_content = true;
                            let index = run_at(&runs, start);
                            rendered[index].push_str(&value);
                        }
                    }
                    Token::Open { name, inverted } => {
                        has_section_tag = true;
                        let truthy = !self.lookup(&name).trim().is_empty();
                        self.sections.push(Section {
                            name,
                            visible: truthy != inverted,
                        });
                    }
                    Token::Close { name } => {
                        has_section_tag = true;
                        self.close_section(name);
                    }
                }
            }
            outputs = Some(rendered);
        }

        let nested_out: Vec<Option<String>> = nested
            .iter()
            .map(|span| self.render_paragraph(&xml[span.clone()]))
            .collect();

        if has_section_tag && !visible_content && nested.is_empty() {
            return None;
        }
        if !has_section_tag && !visible_at_start {
            return None;
        }

        // 按文档顺序拼回：run 替换为新文字，嵌套段落替换为渲染结果
        let mut pieces: Vec<(Range<usize>, Option<String>)> = nested
            .into_iter()
            .zip(nested_out)
            .collect();
        if let Some(rendered) = outputs {
            pieces.extend(
                runs.iter()
                    .zip(rendered)
                    .map(|(run, text)| (run.range.clone(), Some(text_element(&text)))),
            );
        }
        pieces.sort_by_key(|(range, _)| range.start);

        let mut result = String::with_capacity(xml.len());
        let mut last = 0;
        for (range, replacement) in pieces {
            result.push_str(&xml[last..range.start]);
            if let Some(replacement) = replacement {
                result.push_str(&replacement);
            }
            last = range.end;
        }
        result.push_str(&xml[last..]);
        Some(result)
    }

    fn close_section(&mut self, name: String) {
        match self.sections.pop() {
            None => self.errors.push(PlaceholderError::UnopenedSection {
                part: self.part.to_string(),
                name,
            }),
            Some(open) if open.name != name => {
                self.errors.push(PlaceholderError::MismatchedSection {
                    part: self.part.to_string(),
                    expected: open.name,
                    found: name,
                })
            }
            Some(_) => {}
        }
    }

    fn lookup(&mut self, name: &str) -> String {
        match self.fields.get(name) {
            Some(value) => value.clone(),
            None => {
                if self.strict {
                    self.errors.push(PlaceholderError::UnknownPlaceholder {
                        part: self.part.to_string(),
                        name: name.to_string(),
                    });
                }
                String::new()
            }
        }
    }

    /// 把段落文本切分为文字和标签
    fn tokenize(&mut self, text: &str) -> Vec<Token> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut text_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' => {
                    let rest = &text[i + 1..];
                    let close = rest.find('}');
                    let next_open = rest.find('{');
                    match close {
                        Some(c) if next_open.map_or(true, |o| o > c) => {
                            if text_start < i {
                                tokens.push(Token::Text {
                                    start: text_start,
                                    end: i,
                                });
                            }
                            if let Some(token) = self.parse_tag(rest[..c].trim(), i) {
                                tokens.push(token);
                            }
                            i += c + 2;
                            text_start = i;
                        }
                        _ => {
                            self.errors.push(PlaceholderError::UnclosedTag {
                                part: self.part.to_string(),
                                fragment: fragment(&text[i..]),
                            });
                            i += 1;
                        }
                    }
                }
                b'}' => {
                    self.errors.push(PlaceholderError::UnopenedTag {
                        part: self.part.to_string(),
                        fragment: fragment(&text[text_start..=i]),
                    });
                    i += 1;
                }
                _ => i += 1,
            }
        }

        if text_start < bytes.len() {
            tokens.push(Token::Text {
                start: text_start,
                end: bytes.len(),
            });
        }
        tokens
    }

    fn parse_tag(&mut self, inner: &str, start: usize) -> Option<Token> {
        let (prefix, name) = match inner.chars().next() {
            Some(c @ ('#' | '^' | '/')) => (Some(c), inner[1..].trim()),
            _ => (None, inner),
        };

        if name.is_empty() {
            self.errors.push(PlaceholderError::EmptyTag {
                part: self.part.to_string(),
            });
            return None;
        }

        let name = name.to_string();
        Some(match prefix {
            Some('#') => Token::Open {
                name,
                inverted: false,
            },
            Some('^') => Token::Open {
                name,
                inverted: true,
            },
            Some(_) => Token::Close { name },
            None => Token::Placeholder { name, start },
        })
    }
}

/// 按标签深度找出 `range` 内最外层段落的位置（自闭合段落跳过）
fn paragraph_spans(xml: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for caps in PARAGRAPH_TAG_RE.captures_iter(&xml[range.clone()]) {
        let Some(tag) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.is_empty());
        let self_closing = caps.get(2).is_some_and(|m| !m.is_empty());
        let (tag_start, tag_end) = (range.start + tag.start(), range.start + tag.end());

        if self_closing {
            continue;
        }
        if closing {
            if depth > 0 {
                depth -= 1;
                if depth == 0 {
                    spans.push(start..tag_end);
                }
            }
        } else {
            if depth == 0 {
                start = tag_start;
            }
            depth += 1;
        }
    }
    spans
}

/// 没有段落的单元格补一个空段落，否则 Word 无法打开文档
fn ensure_cell_paragraphs(xml: &str) -> String {
    if !xml.contains("<w:tc") {
        return xml.to_string();
    }

    let mut out = String::with_capacity(xml.len());
    let mut last = 0;
    // 每个未闭合单元格是否已有段落
    let mut cells: Vec<bool> = Vec::new();

    for caps in BLOCK_TAG_RE.captures_iter(xml) {
        let Some(tag) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.is_empty());
        let is_cell = caps.get(2).is_some_and(|m| m.as_str() == "tc");

        match (is_cell, closing, self_closing) {
            (true, false, false) => cells.push(false),
            (true, true, _) => {
                if cells.pop() == Some(false) {
                    out.push_str(&xml[last..tag.start()]);
                    out.push_str(EMPTY_PARAGRAPH);
                    last = tag.start();
                }
            }
            (false, false, _) => {
                if let Some(has_paragraph) = cells.last_mut() {
                    *has_paragraph = true;
                }
            }
            _ => {}
        }
    }
    out.push_str(&xml[last..]);
    out
}

/// 找到包含 `pos` 的 run
fn run_at(runs: &[TextRun], pos: usize) -> usize {
    let mut offset = 0;
    for (index, run) in runs.iter().enumerate() {
        if pos < offset + run.text.len() {
            return index;
        }
        offset += run.text.len();
    }
    runs.len().saturating_sub(1)
}

/// 把 `range` 范围内的文字按原 run 边界写回
fn distribute(runs: &[TextRun], joined: &str, range: Range<usize>, outputs: &mut [String]) {
    let mut offset = 0;
    for (index, run) in runs.iter().enumerate() {
        let run_range = offset..offset + run.text.len();
        offset = run_range.end;

        let start = range.start.max(run_range.start);
        let end = range.end.min(run_range.end);
        if start < end {
            outputs[index].push_str(&joined[start..end]);
        }
    }
}

fn text_element(text: &str) -> String {
    // 垂直制表符是 Word 的手动换行
    let body = text
        .replace('\u{0B}', "\n")
        .split('\n')
        .map(|line| escape_xml(line.trim_end_matches('\r')))
        .collect::<Vec<_>>()
        .join(LINE_BREAK);
    format!(r#"<w:t xml:space="preserve">{}</w:t>"#, body)
}

fn fragment(s: &str) -> String {
    s.chars().take(FRAGMENT_LEN).collect()
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if is_illegal_xml_char(c) => {}
            _ => out.push(c),
        }
    }
    out
}

/// XML 1.0 不允许出现的字符
fn is_illegal_xml_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

pub fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos..];
        let decoded = after
            .find(';')
            .and_then(|semi| decode_entity(&after[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PART: &str = "word/document.xml";

    fn fields(pairs: &[(&str, &str)]) -> FieldMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn paragraph(runs: &[&str]) -> String {
        let body: String = runs
            .iter()
            .map(|t| format!("<w:r><w:rPr><w:b/></w:rPr><w:t>{}</w:t></w:r>", t))
            .collect();
        format!("<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr>{}</w:p>", body)
    }

    fn render(xml: &str, mapping: &FieldMapping, strict: bool) -> (String, Vec<PlaceholderError>) {
        let mut errors = Vec::new();
        let out = render_part(xml, PART, mapping, strict, &mut errors);
        (out, errors)
    }

    fn plain_text(xml: &str) -> String {
        TEXT_RE
            .captures_iter(xml)
            .map(|c| unescape_xml(&c[1]))
            .collect()
    }

    #[test]
    fn test_simple_placeholder() {
        let xml = paragraph(&["Nama: {informasiPribadi.namaLengkap}"]);
        let (out, errors) = render(
            &xml,
            &fields(&[("informasiPribadi.namaLengkap", "Siti Aminah")]),
            true,
        );

        assert!(errors.is_empty());
        assert_eq!(plain_text(&out), "Nama: Siti Aminah");
        assert!(out.contains("<w:jc w:val=\"left\"/>"));
    }

    #[test]
    fn test_placeholder_split_across_runs() {
        let xml = paragraph(&["Tanggal: {tangg", "alDa", "ftar} ."]);
        let (out, errors) = render(&xml, &fields(&[("tanggalDaftar", "5 Maret 2024")]), true);

        assert!(errors.is_empty());
        assert_eq!(plain_text(&out), "Tanggal: 5 Maret 2024 .");
        // 格式保留：run 数量不变
        assert_eq!(out.matches("<w:r>").count(), 3);
    }

    #[test]
    fn test_newline_becomes_line_break_and_values_are_escaped() {
        let xml = paragraph(&["{alamat}"]);
        let (out, errors) = render(
            &xml,
            &fields(&[("alamat", "Jl. Merdeka <No. 5>\nBandung & sekitarnya")]),
            true,
        );

        assert!(errors.is_empty());
        assert!(out.contains("<w:br/>"));
        assert!(out.contains("&lt;No. 5&gt;"));
        assert!(out.contains("Bandung &amp; sekitarnya"));
    }

    #[test]
    fn test_paragraph_without_tags_is_untouched() {
        let xml = format!("<w:body>{}</w:body>", paragraph(&["KARTU RENCANA STUDI"]));
        let (out, errors) = render(&xml, &FieldMapping::new(), true);
        assert!(errors.is_empty());
        assert_eq!(out, xml);
    }

    #[test]
    fn test_unknown_placeholder_strict_and_lenient() {
        let xml = paragraph(&["{tidakAda}"]);

        let (_, errors) = render(&xml, &FieldMapping::new(), true);
        assert_eq!(
            errors,
            vec![PlaceholderError::UnknownPlaceholder {
                part: PART.to_string(),
                name: "tidakAda".to_string(),
            }]
        );

        let (out, errors) = render(&xml, &FieldMapping::new(), false);
        assert!(errors.is_empty());
        assert_eq!(plain_text(&out), "");
    }

    #[test]
    fn test_malformed_tags_are_all_reported() {
        let xml = format!(
            "{}{}{}",
            paragraph(&["{nama"]),
            paragraph(&["nama}"]),
            paragraph(&["{ }"])
        );
        let (_, errors) = render(&xml, &fields(&[("nama", "Budi")]), true);

        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], PlaceholderError::UnclosedTag { .. }));
        assert!(matches!(errors[1], PlaceholderError::UnopenedTag { .. }));
        assert!(matches!(errors[2], PlaceholderError::EmptyTag { .. }));
    }

    #[test]
    fn test_section_paragraphs_are_dropped_and_content_kept_when_truthy() {
        let xml = format!(
            "{}{}{}{}",
            paragraph(&["{#tanggalDiterima}"]),
            paragraph(&["Diterima: {tanggalDiterima}"]),
            paragraph(&["{/tanggalDiterima}"]),
            paragraph(&["Selesai"])
        );

        let (out, errors) = render(&xml, &fields(&[("tanggalDiterima", "1 April 2024")]), true);
        assert!(errors.is_empty());
        assert_eq!(out.matches("<w:p>").count(), 2);
        assert_eq!(plain_text(&out), "Diterima: 1 April 2024Selesai");
    }

    #[test]
    fn test_section_removed_when_value_empty_and_inverted_shown() {
        let xml = format!(
            "{}{}{}{}{}",
            paragraph(&["{#tanggalDiterima}"]),
            paragraph(&["Diterima: {tanggalDiterima}"]),
            paragraph(&["{/tanggalDiterima}"]),
            paragraph(&["{^tanggalDiterima}Belum diterima{/tanggalDiterima}"]),
            paragraph(&["Selesai"])
        );

        let (out, errors) = render(&xml, &fields(&[("tanggalDiterima", "")]), true);
        assert!(errors.is_empty());
        assert_eq!(plain_text(&out), "Belum diterimaSelesai");
    }

    #[test]
    fn test_section_errors() {
        let (_, errors) = render(&paragraph(&["{#a}x"]), &fields(&[("a", "1")]), true);
        assert!(matches!(errors[0], PlaceholderError::UnclosedSection { .. }));

        let (_, errors) = render(&paragraph(&["x{/a}"]), &fields(&[("a", "1")]), true);
        assert!(matches!(errors[0], PlaceholderError::UnopenedSection { .. }));

        let (_, errors) = render(
            &paragraph(&["{#a}x{/b}"]),
            &fields(&[("a", "1"), ("b", "1")]),
            true,
        );
        assert!(matches!(errors[0], PlaceholderError::MismatchedSection { .. }));
    }

    #[test]
    fn test_escaped_text_is_decoded_before_parsing() {
        let xml = paragraph(&["A &amp; B: {nama} &#x263A;"]);
        let (out, errors) = render(&xml, &fields(&[("nama", "Budi")]), true);
        assert!(errors.is_empty());
        assert_eq!(plain_text(&out), "A & B: Budi \u{263A}");
    }

    #[test]
    fn test_self_closing_text_and_tab_elements_are_ignored() {
        let xml = "<w:p><w:r><w:tab/><w:t/><w:t xml:space=\"preserve\">{nama}</w:t></w:r></w:p>";
        let (out, errors) = render(xml, &fields(&[("nama", "Budi")]), true);
        assert!(errors.is_empty());
        assert!(out.contains("<w:tab/>"));
        assert_eq!(plain_text(&out), "Budi");
    }

    #[test]
    fn test_text_box_paragraphs_inside_a_paragraph() {
        let text_box = "<w:txbxContent><w:p><w:r><w:t>kotak {b}</w:t></w:r></w:p></w:txbxContent>";
        let xml = format!(
            "<w:p><w:r><w:t>{{a}}</w:t></w:r><w:r><mc:AlternateContent>\
             <mc:Choice>{text_box}</mc:Choice><mc:Fallback>{text_box}</mc:Fallback>\
             </mc:AlternateContent></w:r><w:r><w:t> lalu {{c}}</w:t></w:r></w:p>"
        );
        let mapping = fields(&[("a", "A"), ("b", "B"), ("c", "C")]);

        let (out, errors) = render(&xml, &mapping, true);
        assert!(errors.is_empty());
        assert_eq!(plain_text(&out), "Akotak Bkotak B lalu C");
        assert!(out.contains("<mc:Fallback><w:txbxContent><w:p>"));

        let (_, errors) = render(&xml, &fields(&[("a", "A"), ("b", "B")]), true);
        assert_eq!(
            errors,
            vec![PlaceholderError::UnknownPlaceholder {
                part: PART.to_string(),
                name: "c".to_string(),
            }]
        );
    }

    #[test]
    fn test_emptied_table_cell_keeps_a_paragraph() {
        let xml = format!(
            "<w:tbl><w:tr><w:tc><w:tcPr><w:tcW w:w=\"2000\"/></w:tcPr>{}{}{}</w:tc>\
             <w:tc>{}</w:tc></w:tr></w:tbl>",
            paragraph(&["{#tanggalDiterima}"]),
            paragraph(&["{tanggalDiterima}"]),
            paragraph(&["{/tanggalDiterima}"]),
            paragraph(&["Paraf"])
        );

        let (out, errors) = render(&xml, &fields(&[("tanggalDiterima", "")]), true);
        assert!(errors.is_empty());
        assert!(out.contains("<w:tcW w:w=\"2000\"/></w:tcPr><w:p/></w:tc>"));
        assert_eq!(out.matches("<w:p/>").count(), 1);

        let (out, _) = render(&xml, &fields(&[("tanggalDiterima", "1 April 2024")]), true);
        assert!(!out.contains("<w:p/>"));
    }

    #[test]
    fn test_control_characters_are_not_written() {
        let xml = paragraph(&["{alamat}"]);
        let (out, errors) = render(&xml, &fields(&[("alamat", "Jl. A\u{0B}B\u{1}")]), true);

        assert!(errors.is_empty());
        assert!(out.contains("<w:br/>"));
        assert!(!out.contains(['\u{0B}', '\u{1}']));
        assert_eq!(plain_text(&out), "Jl. AB");

        assert_eq!(escape_xml("a\u{0}b\u{1F}\tc\u{FFFE}"), "ab\tc");
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape_xml("a &nbsp; b & c"), "a &nbsp; b & c");
        assert_eq!(escape_xml("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
