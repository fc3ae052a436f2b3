// Example: minimal usage, windowed rendering and scroll-to helper.
use viewport_window::{Align, VirtualList, VirtualListOptions};

fn main() -> Result<(), viewport_window::ConfigError> {
    let rows: Vec<String> = (0..1_000).map(|i| format!("row {i}")).collect();
    let mut list = VirtualList::new(rows, VirtualListOptions::new(60.0, 256.0).with_overscan(5))?;
    list.set_viewport(600.0, 256.0);

    println!("total_extent={}", list.total_extent());
    println!("window={:?}", list.window());
    println!("placement_offset={}", list.placement_offset());
    for line in list.render_with(|row, index| format!("#{index} {row}")) {
        println!("{line}");
    }

    let off = list.scroll_to_index(999, Align::End);
    println!("after scroll_to_index: offset={off} window={:?}", list.window());
    Ok(())
}
