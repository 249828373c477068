use anyhow::{Context, Result};
use clap::Parser;
use html_docx_model::{Alignment, ConvertOptions, Document, HeadingLevel, Paragraph, TextRun};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input HTML file (editor fragment or full document).
    #[arg(long)]
    html_file: PathBuf,

    /// Output .docx path. Ignored with --dump-model.
    #[arg(long, required_unless_present = "dump_model")]
    out: Option<PathBuf>,

    /// Prefix of the editor's formatting classes.
    #[arg(long, default_value = html_docx_model::DEFAULT_CLASS_PREFIX)]
    class_prefix: String,

    /// Print the converted paragraphs as JSON instead of writing a .docx.
    #[arg(long)]
    dump_model: bool,

    /// Log conversion details to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn run_xml(run: &TextRun) -> String {
    let style = &run.style;
    let mut out = String::new();
    out.push_str("<w:r><w:rPr>");
    if style.bold {
        out.push_str("<w:b/>");
    }
    if style.italic {
        out.push_str("<w:i/>");
    }
    if style.strike {
        out.push_str("<w:strike/>");
    }
    if let Some(color) = &style.color {
        out.push_str(&format!("<w:color w:val=\"{color}\"/>"));
    }
    out.push_str(&format!(
        "<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>",
        style.size_half_points
    ));
    if let Some(hl) = style.highlight {
        out.push_str(&format!("<w:highlight w:val=\"{}\"/>", hl.as_str()));
    }
    if style.underline {
        out.push_str("<w:u w:val=\"single\"/>");
    }
    out.push_str("</w:rPr>");
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&xml_escape_text(&run.text));
    out.push_str("</w:t></w:r>");
    out
}

fn heading_style_id(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "Heading1",
        HeadingLevel::H2 => "Heading2",
        HeadingLevel::H3 => "Heading3",
    }
}

fn jc_value(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
        Alignment::Justify => Some("both"),
    }
}

fn paragraph_xml(p: &Paragraph) -> String {
    let mut out = String::new();
    out.push_str("<w:p>");

    let jc = jc_value(p.alignment);
    if p.heading.is_some() || jc.is_some() {
        out.push_str("<w:pPr>");
        if let Some(level) = p.heading {
            out.push_str(&format!("<w:pStyle w:val=\"{}\"/>", heading_style_id(level)));
        }
        if let Some(jc) = jc {
            out.push_str(&format!("<w:jc w:val=\"{jc}\"/>"));
        }
        out.push_str("</w:pPr>");
    }

    for run in &p.runs {
        // Placeholder runs of blank lines only keep the paragraph mark.
        if !run.text.is_empty() {
            out.push_str(&run_xml(run));
        }
    }

    out.push_str("</w:p>");
    out
}

fn document_xml(doc: &Document) -> String {
    let body: String = doc.iter().map(paragraph_xml).collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
      <w:cols w:space="708"/>
      <w:docGrid w:linePitch="360"/>
    </w:sectPr>
  </w:body>
</w:document>"#,
        body = body
    )
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
}

fn heading_style_xml(level: u8) -> String {
    format!(
        r#"  <w:style w:type="paragraph" w:styleId="Heading{level}">
    <w:name w:val="heading {level}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:keepNext/>
      <w:spacing w:before="240" w:after="120"/>
      <w:outlineLvl w:val="{outline}"/>
    </w:pPr>
  </w:style>
"#,
        level = level,
        outline = level - 1
    )
}

fn styles_xml() -> String {
    let mut out = String::new();
    out.push_str(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
"#,
    );
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        out.push_str(&heading_style_xml(level.level()));
    }
    out.push_str("</w:styles>");
    out
}

fn write_docx<W: Write + Seek>(sink: W, doc: &Document) -> Result<()> {
    let mut zip = ZipWriter::new(sink);
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts)?;
    zip.write_all(content_types_xml().as_bytes())?;

    zip.start_file("_rels/.rels", opts)?;
    zip.write_all(rels_xml().as_bytes())?;

    zip.start_file("word/document.xml", opts)?;
    zip.write_all(document_xml(doc).as_bytes())?;

    zip.start_file("word/styles.xml", opts)?;
    zip.write_all(styles_xml().as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opts)?;
    zip.write_all(document_rels_xml().as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    use log::LevelFilter::*;
    let level = if verbose { Debug } else { Warn };
    let _ = env_logger::builder()
        .filter_module("html_docx_model", level)
        .filter_module("docx_from_html", level)
        .parse_default_env()
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let opts = ConvertOptions::default().with_class_prefix(args.class_prefix.clone());
    let mut input = File::open(&args.html_file)
        .with_context(|| format!("open {}", args.html_file.display()))?;
    let doc = html_docx_model::read_document(&mut input, &opts)
        .with_context(|| format!("convert {}", args.html_file.display()))?;
    log::debug!("{} paragraph(s)", doc.len());

    if args.dump_model {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer_pretty(&mut lock, &doc)?;
        writeln!(lock)?;
        return Ok(());
    }

    let Some(out_path) = args.out else {
        anyhow::bail!("--out is required unless --dump-model is given");
    };
    let f = File::create(&out_path).with_context(|| format!("create {}", out_path.display()))?;
    write_docx(f, &doc).with_context(|| format!("write {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_docx_model::html_to_document;
    use std::io::Read;

    fn doc(html: &str) -> Document {
        html_to_document(html).unwrap()
    }

    #[test]
    fn run_properties_follow_style() {
        let xml = document_xml(&doc(
            r#"<p><span style="color:red;background-color:yellow;font-size:9pt"><b><i><u><s>x</s></u></i></b></span></p>"#,
        ));
        for needle in [
            "<w:b/>",
            "<w:i/>",
            "<w:strike/>",
            "<w:color w:val=\"FF0000\"/>",
            "<w:sz w:val=\"18\"/>",
            "<w:highlight w:val=\"yellow\"/>",
            "<w:u w:val=\"single\"/>",
        ] {
            assert!(xml.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn headings_and_alignment() {
        let xml = document_xml(&doc(r#"<h3>T</h3><p class="ql-align-justify">j</p><p>l</p>"#));
        assert!(xml.contains("<w:pStyle w:val=\"Heading3\"/>"));
        assert!(xml.contains("<w:jc w:val=\"both\"/>"));
        assert_eq!(xml.matches("<w:jc ").count(), 1);
    }

    #[test]
    fn text_is_escaped() {
        let xml = document_xml(&doc("<p>a &lt;b&gt; &amp; \"c\"</p>"));
        assert!(xml.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
    }

    #[test]
    fn blank_document_keeps_one_empty_paragraph() {
        let xml = document_xml(&doc(""));
        assert_eq!(xml.matches("<w:p>").count(), 1);
        assert!(!xml.contains("<w:r>"));
    }

    #[test]
    fn writes_a_readable_package() {
        let file = tempfile::tempfile().unwrap();
        write_docx(&file, &doc("<h1>Report</h1><ol><li>first</li></ol>")).unwrap();

        let mut archive = zip::ZipArchive::new(file).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }
        let mut body = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert!(body.contains("Report"));
        assert!(body.contains("1. first"));
    }
}
