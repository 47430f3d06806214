//! Elastic tab-stop table formatting.
//!
//! Every cell of a row except the last is tab-terminated and belongs to a column.
//! A column is aligned over a *block*: a run of consecutive rows that all have a
//! terminated cell in that column, so a row with fewer cells ends the block.
//! Cells are left-justified and padded with spaces to the block width (widest
//! cell plus the padding). The last cell of a row is never padded.

/// Rows of cells awaiting alignment.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
    padding: usize,
}

impl Table {
    pub fn new(padding: usize) -> Self {
        Table {
            rows: Vec::new(),
            padding,
        }
    }
    pub fn add_row<I, T>(&mut self, cells: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Render all rows, one per line (no trailing newline).
    pub fn render(&self) -> String {
        let mut out: Vec<String> = Vec::with_capacity(self.rows.len());
        let mut widths = Vec::new();
        self.format(&mut widths, 0, self.rows.len(), &mut out);
        out.join("\n")
    }

    fn format(&self, widths: &mut Vec<usize>, mut line0: usize, line1: usize, out: &mut Vec<String>) {
        let column = widths.len();
        let mut this = line0;
        while this < line1 {
            if column + 1 >= self.rows[this].len() {
                this += 1;
                continue;
            }
            // rows before the block only use the columns already sized
            self.write_lines(widths, line0, this, out);
            line0 = this;

            let mut width = 0;
            while this < line1 && column + 1 < self.rows[this].len() {
                width = width.max(self.rows[this][column].chars().count() + self.padding);
                this += 1;
            }
            widths.push(width);
            self.format(widths, line0, this, out);
            widths.pop();
            line0 = this;
        }
        self.write_lines(widths, line0, line1, out);
    }

    fn write_lines(&self, widths: &[usize], line0: usize, line1: usize, out: &mut Vec<String>) {
        for row in &self.rows[line0..line1] {
            let mut line = String::new();
            for (j, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if j < widths.len() {
                    let pad = widths[j].saturating_sub(cell.chars().count());
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            out.push(line);
        }
    }
}
