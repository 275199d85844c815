/// Filling `{{key}}` placeholders in a presentation template.
use crate::ooxml::pptx::{Package, Shape};
use crate::template::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::template::error::{Result, TemplateError};
use crate::template::placeholder::{Replacements, find_placeholders, rewrite};
use crate::template::style::FontStyle;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fills the placeholders of a template and writes the result.
///
/// The template is loaded once, when the updater is created. Each call to
/// [`TemplateUpdater::update_template`] rewrites every text frame that
/// contains a placeholder and then saves the whole presentation to the
/// output path. Frames without placeholders, and every other part of the
/// package, are written back unchanged.
///
/// A rewritten frame is reduced to a single paragraph holding a single run.
/// That run takes the formatting of the frame's first run.
///
/// # Examples
///
/// ```rust,no_run
/// use deckfill::template::{Replacements, TemplateUpdater};
///
/// let mut updater = TemplateUpdater::new("template.pptx", "out.pptx")?;
/// let values = Replacements::new()
///     .with("theme", "School")
///     .with("description", "Lorem ipsum");
/// updater.update_template(&values)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct TemplateUpdater<S: DiagnosticSink = TracingSink> {
    package: Package,
    output: PathBuf,
    sink: S,
}

impl TemplateUpdater {
    /// Load `template`; results are saved to `output`.
    pub fn new(template: impl AsRef<Path>, output: impl Into<PathBuf>) -> Result<Self> {
        Self::with_sink(template, output, TracingSink)
    }
}

impl<S: DiagnosticSink> TemplateUpdater<S> {
    /// Like [`TemplateUpdater::new`], reporting diagnostics to `sink`.
    pub fn with_sink(
        template: impl AsRef<Path>,
        output: impl Into<PathBuf>,
        sink: S,
    ) -> Result<Self> {
        let template = template.as_ref();
        let package = Package::open(template).map_err(|source| TemplateError::Load {
            path: template.to_path_buf(),
            source,
        })?;
        info!(template = %template.display(), slides = package.slide_count(), "loaded template");
        Ok(Self::from_package(package, output, sink))
    }

    /// Use a template that is already in memory.
    pub fn from_bytes(data: Vec<u8>, output: impl Into<PathBuf>, sink: S) -> Result<Self> {
        Ok(Self::from_package(Package::from_bytes(data)?, output, sink))
    }

    pub fn from_package(package: Package, output: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            package,
            output: output.into(),
            sink,
        }
    }

    /// Substitute placeholders in every slide, then save once.
    ///
    /// Nothing is written to the output path if an error occurs before the
    /// save; the loaded presentation may already be partly updated.
    pub fn update_template(&mut self, replacements: &Replacements) -> Result<()> {
        let mut updated = 0;
        for (index, slide) in self.package.slides_mut().iter_mut().enumerate() {
            for shape in slide.shapes_mut() {
                if process_shape(index + 1, shape, replacements, &mut self.sink) {
                    updated += 1;
                }
            }
        }
        info!(shapes = updated, "substituted placeholders");

        self.package
            .save(&self.output)
            .map_err(|source| TemplateError::Save {
                path: self.output.clone(),
                source,
            })
    }

    #[inline]
    pub fn package(&self) -> &Package {
        &self.package
    }

    #[inline]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Rewrite one shape; returns whether it had placeholders.
fn process_shape<S: DiagnosticSink>(
    slide: usize,
    shape: &mut Shape,
    replacements: &Replacements,
    sink: &mut S,
) -> bool {
    let name = shape.name().to_string();
    let Some(frame) = shape.text_frame_mut() else {
        return false;
    };

    let text = frame.text();
    let placeholders = find_placeholders(&text);
    if placeholders.is_empty() {
        return false;
    }
    debug!(slide, shape = %name, ?placeholders, "substituting placeholders");

    let style = FontStyle::capture(frame);
    let new_text = rewrite(&text, replacements);

    frame.clear();
    let run = frame.add_paragraph().add_run();
    run.set_text(new_text);
    if let Some(style) = style {
        style.apply(run.font_mut(), &mut |error| {
            sink.report(Diagnostic::ColorNotApplied {
                slide,
                shape: name.clone(),
                error,
            })
        });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::{OpcPackage, PackURI};
    use crate::ooxml::pptx::testutil::{build_pptx, picture, slide_xml, text_shape};
    use crate::ooxml::pptx::{FontSize, RGBColor, ThemeColor};
    use crate::template::diagnostics::CollectingSink;

    const SLIDE1: &str = "/ppt/slides/slide1.xml";

    fn para(rpr: &str, text: &str) -> String {
        format!(r#"<a:p><a:r>{rpr}<a:t>{text}</a:t></a:r></a:p>"#)
    }

    /// Fill a one-slide deck holding `shapes` and reload the output.
    fn fill(shapes: &[String], values: &Replacements) -> (Package, CollectingSink) {
        fill_slides(&[slide_xml(shapes)], values)
    }

    fn fill_slides(slides: &[String], values: &Replacements) -> (Package, CollectingSink) {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.pptx");
        let output = dir.path().join("out.pptx");
        std::fs::write(&template, build_pptx(slides)).unwrap();

        let mut updater =
            TemplateUpdater::with_sink(&template, &output, CollectingSink::new()).unwrap();
        updater.update_template(values).unwrap();
        (Package::open(&output).unwrap(), updater.into_sink())
    }

    fn text_of(pkg: &Package, shape: usize) -> String {
        pkg.slides()[0].shapes()[shape].text_frame().unwrap().text()
    }

    fn slide_bytes(data: Vec<u8>) -> Vec<u8> {
        let opc = OpcPackage::from_bytes(data).unwrap();
        opc.blob(&PackURI::new(SLIDE1).unwrap()).unwrap().to_vec()
    }

    #[test]
    fn test_adjacent_placeholders() {
        let values = Replacements::new().with("a", "X").with("b", "Y");
        let (pkg, _) = fill(&[text_shape(2, "T", &para("", "{{a}}{{b}}"))], &values);
        assert_eq!(text_of(&pkg, 0), "XY");
    }

    #[test]
    fn test_absent_key_becomes_empty() {
        let (pkg, _) = fill(
            &[text_shape(2, "T", &para("", "Hi {{name}}!"))],
            &Replacements::new(),
        );
        assert_eq!(text_of(&pkg, 0), "Hi !");
    }

    #[test]
    fn test_shapes_without_placeholders_are_untouched() {
        let shapes = [
            text_shape(2, "Static", &para(r#"<a:rPr lang="en-US" sz="1400"/>"#, "no tokens here { }")),
            picture(3, "Logo"),
        ];
        let template = build_pptx(&[slide_xml(&shapes)]);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pptx");

        let mut updater =
            TemplateUpdater::from_bytes(template.clone(), &output, CollectingSink::new()).unwrap();
        updater
            .update_template(&Replacements::new().with("theme", "x"))
            .unwrap();

        assert_eq!(
            slide_bytes(std::fs::read(&output).unwrap()),
            slide_bytes(template)
        );
        assert!(updater.sink().is_empty());
    }

    #[test]
    fn test_only_placeholder_frames_change() {
        let untouched = text_shape(3, "Body", &para("", "static"));
        let (pkg, _) = fill(
            &[text_shape(2, "Title", &para("", "{{theme}}")), untouched.clone()],
            &Replacements::new().with("theme", "School"),
        );
        let xml = String::from_utf8(pkg.slides()[0].to_xml()).unwrap();
        assert!(xml.contains(&untouched));
        assert_eq!(text_of(&pkg, 0), "School");
    }

    #[test]
    fn test_second_pass_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.pptx");
        let second = dir.path().join("second.pptx");
        let template = build_pptx(&[slide_xml(&[text_shape(2, "T", &para("", "{{theme}} day"))])]);
        let values = Replacements::new().with("theme", "School");

        let mut updater = TemplateUpdater::from_bytes(template, &first, TracingSink).unwrap();
        updater.update_template(&values).unwrap();

        let mut again =
            TemplateUpdater::with_sink(&first, &second, CollectingSink::new()).unwrap();
        again.update_template(&values).unwrap();

        assert_eq!(
            slide_bytes(std::fs::read(&first).unwrap()),
            slide_bytes(std::fs::read(&second).unwrap())
        );
    }

    #[test]
    fn test_style_survives_long_replacement() {
        let rpr = r#"<a:rPr lang="en-US" sz="1800" b="1"><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></a:rPr>"#;
        let long = "a considerably longer replacement text than the placeholder itself";
        let (pkg, _) = fill(
            &[text_shape(2, "T", &para(rpr, "{{theme}}"))],
            &Replacements::new().with("theme", long),
        );

        let frame = pkg.slides()[0].shapes()[0].text_frame().unwrap();
        let font = frame.paragraphs()[0].runs().next().unwrap().font();
        assert_eq!(frame.text(), long);
        assert_eq!(font.bold(), Some(true));
        assert_eq!(font.size(), Some(FontSize::from_pt(18.0)));
        assert_eq!(font.color().unwrap().rgb(), Ok(RGBColor::new(255, 0, 0)));
    }

    #[test]
    fn test_theme_color_stays_a_reference() {
        let rpr = r#"<a:rPr lang="en-US"><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></a:rPr>"#;
        let (pkg, sink) = fill(
            &[text_shape(2, "T", &para(rpr, "{{theme}}"))],
            &Replacements::new().with("theme", "School"),
        );
        let frame = pkg.slides()[0].shapes()[0].text_frame().unwrap();
        let color = frame.paragraphs()[0].runs().next().unwrap().font().color().unwrap();
        assert_eq!(color.theme_color(), Some(ThemeColor::Accent1));
        assert!(color.rgb().is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_runs_collapse_to_first_run_style() {
        let body = concat!(
            r#"<a:p><a:r><a:rPr lang="en-US" b="1"/><a:t>Dear </a:t></a:r>"#,
            r#"<a:r><a:rPr lang="en-US" i="1"/><a:t>{{name}}</a:t></a:r>"#,
            r#"<a:r><a:rPr lang="en-US" u="sng"/><a:t>, welcome</a:t></a:r></a:p>"#,
            r#"<a:p><a:r><a:t>{{theme}}</a:t></a:r></a:p>"#
        );
        let values = Replacements::new().with("name", "Ada").with("theme", "School");
        let (pkg, _) = fill(&[text_shape(2, "T", body)], &values);

        let frame = pkg.slides()[0].shapes()[0].text_frame().unwrap();
        assert_eq!(frame.paragraphs().len(), 1);
        let runs: Vec<_> = frame.paragraphs()[0].runs().collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "Dear Ada, welcome\nSchool");
        assert_eq!(runs[0].font().bold(), Some(true));
        assert_eq!(runs[0].font().italic(), None);
        assert_eq!(runs[0].font().underline(), None);
    }

    #[test]
    fn test_rejected_color_is_reported_and_skipped() {
        let rpr = r#"<a:rPr lang="en-US" b="1"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:rPr>"#;
        let (pkg, sink) = fill(
            &[text_shape(7, "Subtitle 2", &para(rpr, "{{description}}"))],
            &Replacements::new().with("description", "Lorem ipsum"),
        );

        let font = pkg.slides()[0].shapes()[0].text_frame().unwrap().paragraphs()[0]
            .runs()
            .next()
            .unwrap()
            .font()
            .clone();
        assert_eq!(font.bold(), Some(true));
        assert!(font.color().is_none());

        assert_eq!(sink.diagnostics().len(), 1);
        let Diagnostic::ColorNotApplied { slide, shape, .. } = &sink.diagnostics()[0];
        assert_eq!(*slide, 1);
        assert_eq!(shape, "Subtitle 2");
    }

    #[test]
    fn test_every_slide_is_filled() {
        let split_name = concat!(
            r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>Dear {{na</a:t></a:r>"#,
            r#"<a:r><a:rPr lang="en-US"/><a:t>me}}</a:t></a:r></a:p>"#
        );
        let ph_clr = r#"<a:rPr lang="en-US"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:rPr>"#;
        let slides = [
            slide_xml(&[text_shape(2, "Greeting", split_name)]),
            slide_xml(&[
                picture(2, "Logo"),
                text_shape(3, "Footer", &para(ph_clr, "{{a}}{{b}}")),
            ]),
        ];
        let values = Replacements::new()
            .with("name", "<Ada & \"Co\">")
            .with("a", "{{b}}")
            .with("b", "X\u{1}");
        let (pkg, sink) = fill_slides(&slides, &values);

        assert_eq!(text_of(&pkg, 0), "Dear <Ada & \"Co\">");
        let footer = pkg.slides()[1].shapes()[1].text_frame().unwrap();
        assert_eq!(footer.text(), "X\u{1}X\u{1}");
        assert_eq!(footer.paragraphs()[0].runs().count(), 1);

        let diagnostics = sink.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        let Diagnostic::ColorNotApplied { slide, shape, .. } = &diagnostics[0];
        assert_eq!(*slide, 2);
        assert_eq!(shape, "Footer");
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateUpdater::new(dir.path().join("absent.pptx"), dir.path().join("out.pptx"));
        assert!(matches!(result, Err(TemplateError::Load { .. })));
    }

    #[test]
    fn test_corrupt_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("broken.pptx");
        std::fs::write(&template, b"PK\x03\x04 truncated").unwrap();
        let result = TemplateUpdater::new(&template, dir.path().join("out.pptx"));
        assert!(matches!(result, Err(TemplateError::Load { .. })));
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("no-such-dir").join("out.pptx");
        let template = build_pptx(&[slide_xml(&[text_shape(2, "T", &para("", "{{a}}"))])]);

        let mut updater = TemplateUpdater::from_bytes(template, &output, TracingSink).unwrap();
        let result = updater.update_template(&Replacements::new());
        assert!(matches!(result, Err(TemplateError::Save { .. })));
        assert!(!output.exists());
    }
}
