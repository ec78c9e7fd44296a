//! Render a small HTML report into one reusable buffer.
//!
//! Run with:
//!     cargo run --example render_report

use std::io::Write;

use growbuf::{Buffer, BufferConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows = [("parse", 1_204u32), ("render", 3_877), ("flush", 92)];

    let mut page = Buffer::new(BufferConfig::large())?;
    let mut row = Buffer::new(BufferConfig::small())?;

    page.append_str("<table>\n")?;
    for (stage, micros) in rows {
        // One scratch buffer for every row; its allocation is reused.
        row.truncate();
        row.append_fmt(format_args!("<tr><td>{}</td><td>{}</td></tr>\n", stage, micros))?;
        page.append_buffer(&row)?;

        println!(
            "row {:<8} {:>3} bytes (scratch capacity {})",
            stage,
            row.len(),
            row.capacity()
        );
    }
    page.append_str("</table>\n")?;

    assert!(page.has_prefix("<table>"));
    println!(
        "\npage: {} bytes, capacity {}\n",
        page.len(),
        page.capacity()
    );

    std::io::stdout().write_all(&page)?;
    Ok(())
}
