//! Read all of standard input into a buffer.
//!
//! Run with:
//!     echo "hello" | cargo run --example slurp_stdin

use growbuf::{Buffer, BufferConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = Buffer::new(BufferConfig::default().with_growth_unit(4096))?;
    let n = input.append_from_reader(&mut std::io::stdin().lock())?;

    println!("read {} bytes (capacity {})", n, input.capacity());
    if let Ok(text) = std::str::from_utf8(&input) {
        println!("lines: {}", text.lines().count());
    }

    let frozen = input.freeze();
    println!("frozen: {} bytes", frozen.len());
    Ok(())
}
