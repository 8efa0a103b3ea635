use crate::export::jpeg::JpegInfo;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Image content of one photo cell.
pub enum CellImage {
    /// Embedded as-is through the DCT filter.
    Jpeg { data: Vec<u8>, info: JpegInfo },
    /// Anything else is drawn as a labelled placeholder.
    Unsupported(String),
}

pub struct PhotoCell {
    pub caption: String,
    pub image: Option<CellImage>,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Helvetica is declared with WinAnsiEncoding: Latin-1 maps 1:1, the rest
/// becomes '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            0x20AC => 0x80,
            _ => b'?',
        })
        .collect()
}

/// Greedy word wrap on an approximate character budget.
fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();

    for word in text.split_whitespace() {
        let extra = if cur.is_empty() { 0 } else { 1 };
        if !cur.is_empty() && cur.chars().count() + extra + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep: String = last.chars().take(max_chars.saturating_sub(3)).collect();
            *last = format!("{keep}...");
        }
    }
    lines
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // ids handed out manually
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 18.0,

            next_id,
            font_id,

            font_size: 9.0,
            header_font_size: 10.0,
            title_font_size: 15.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn content_w(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    /// Create a page whose resources expose the font and `images`.
    fn new_page(&mut self, images: &[(String, Ref)]) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        resources.fonts().pair(Name(b"F1"), self.font_id);
        if !images.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, id) in images {
                xobjects.pair(Name(name.as_bytes()), *id);
            }
        }

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let bytes = win_ansi(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    /// Header block of the first page: label/value pairs, two per row.
    /// Returns the y coordinate below the block.
    fn draw_header_block(&self, content: &mut Content, top: f32, fields: &[(&str, String)]) -> f32 {
        let half = self.content_w() / 2.0;
        let label_w = 80.0;
        let mut y = top;

        for pair in fields.chunks(2) {
            y -= self.row_h;
            for (col, (label, value)) in pair.iter().enumerate() {
                let x = self.margin + col as f32 * half;
                self.fill_rect(content, x, y, label_w, self.row_h, 0.90);
                self.draw_cell_borders(content, x, y, label_w, self.row_h);
                self.draw_cell_borders(content, x + label_w, y, half - label_w, self.row_h);
                self.draw_text(content, x + 4.0, y + 5.0, self.header_font_size, label);
                self.draw_text(content, x + label_w + 4.0, y + 5.0, self.header_font_size, value);
            }
        }

        y
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_image(&self, content: &mut Content, name: &str, info: &JpegInfo, bx: f32, by: f32, bw: f32, bh: f32) {
        let (w, h) = (info.width as f32, info.height as f32);
        let scale = (bw / w).min(bh / h);
        let (dw, dh) = (w * scale, h * scale);
        let dx = bx + (bw - dw) / 2.0;
        let dy = by + (bh - dh) / 2.0;

        content.save_state();
        content.transform([dw, 0.0, 0.0, dh, dx, dy]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
    }

    fn draw_footer(&self, content: &mut Content, page: usize, total: usize) {
        let label = format!("Page {} / {}", page, total);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 20.0,
            self.font_size,
            &label,
        );
    }

    /// Render one report page.
    ///
    /// `header` is only given for the first page. Cells are laid out on two
    /// columns filling the space left under the title.
    pub fn write_report_page(
        &mut self,
        page: usize,
        total: usize,
        header: Option<&[(&str, String)]>,
        title: &str,
        cells: &[PhotoCell],
    ) {
        // image objects must exist before the page references them
        let mut images: Vec<(String, Ref)> = Vec::new();
        let mut cell_image_names: Vec<Option<String>> = Vec::with_capacity(cells.len());
        for (k, cell) in cells.iter().enumerate() {
            match &cell.image {
                Some(CellImage::Jpeg { data, info }) => {
                    let id = self.fresh_ref();
                    let mut image = self.pdf.image_xobject(id, data);
                    image.filter(Filter::DctDecode);
                    image.width(info.width as i32);
                    image.height(info.height as i32);
                    match info.components {
                        1 => image.color_space().device_gray(),
                        4 => image.color_space().device_cmyk(),
                        _ => image.color_space().device_rgb(),
                    };
                    image.bits_per_component(8);

                    let name = format!("Im{}", k + 1);
                    images.push((name.clone(), id));
                    cell_image_names.push(Some(name));
                }
                _ => cell_image_names.push(None),
            }
        }

        let mut content = self.new_page(&images);
        let mut y = self.page_h - self.margin;

        if let Some(fields) = header {
            y -= self.title_font_size;
            self.draw_text(&mut content, self.margin, y, self.title_font_size, "PHOTO DELIVERY REPORT");
            y -= 8.0;
            y = self.draw_header_block(&mut content, y, fields);
            y -= 10.0;
        }

        y -= self.title_font_size + 4.0;
        self.draw_text(&mut content, self.margin, y, self.title_font_size, title);
        y -= 10.0;

        let cols = 2usize;
        let rows = cells.len().div_ceil(cols).max(1);
        let grid_bottom = self.margin;
        let cell_w = self.content_w() / cols as f32;
        let cell_h = (y - grid_bottom) / rows as f32;
        let caption_h = 2.0 * (self.font_size + 3.0) + 6.0;
        let max_chars = ((cell_w - 8.0) / (self.font_size * 0.5)) as usize;

        for (k, cell) in cells.iter().enumerate() {
            let col = k % cols;
            let row = k / cols;
            let x = self.margin + col as f32 * cell_w;
            let cy = y - (row + 1) as f32 * cell_h;

            self.draw_cell_borders(&mut content, x, cy, cell_w, cell_h);

            let img_y = cy + caption_h;
            let img_h = (cell_h - caption_h - 8.0).max(0.0);
            match (&cell.image, &cell_image_names[k]) {
                (Some(CellImage::Jpeg { info, .. }), Some(name)) => {
                    self.draw_image(&mut content, name, info, x + 4.0, img_y + 4.0, cell_w - 8.0, img_h);
                }
                (Some(CellImage::Unsupported(mime)), _) => {
                    self.fill_rect(&mut content, x + 4.0, img_y + 4.0, cell_w - 8.0, img_h, 0.95);
                    self.draw_text(
                        &mut content,
                        x + 10.0,
                        img_y + img_h / 2.0,
                        self.font_size,
                        &format!("[image: {}]", mime),
                    );
                }
                _ => {}
            }

            let mut line_y = cy + caption_h - self.font_size - 4.0;
            for line in wrap(&cell.caption, max_chars, 2) {
                self.draw_text(&mut content, x + 4.0, line_y, self.font_size, &line);
                line_y -= self.font_size + 3.0;
            }
        }

        self.draw_footer(&mut content, page, total);
        self.finalize_page(content);
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        let bytes = self.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
