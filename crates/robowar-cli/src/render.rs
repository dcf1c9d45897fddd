use robowar_protocol::Snapshot;

const CORNER: char = '+';
const HORIZONTAL_BAR: char = '-';
const VERTICAL_BAR: char = '|';
const EMPTY: char = ' ';

/// Draws the board framed in ASCII, one character per cell. Each robot is
/// shown by the first letter of its name; the first robot in rotation order
/// wins a shared cell.
pub fn board(snapshot: &Snapshot) -> String {
    let width = snapshot.width as usize;
    let height = snapshot.height as usize;
    let mut cells = vec![EMPTY; width * height];

    for robot in snapshot.robots.iter().rev() {
        let (x, y) = (robot.pos.x, robot.pos.y);
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            continue;
        }
        cells[y as usize * width + x as usize] = robot.name.chars().next().unwrap_or('?');
    }

    let border: String = std::iter::once(CORNER)
        .chain(std::iter::repeat(HORIZONTAL_BAR).take(width))
        .chain(std::iter::once(CORNER))
        .collect();

    let mut out = String::with_capacity((width + 3) * (height + 2));
    out.push_str(&border);
    out.push('\n');
    for row in cells.chunks(width.max(1)) {
        out.push(VERTICAL_BAR);
        out.extend(row);
        out.push(VERTICAL_BAR);
        out.push('\n');
    }
    out.push_str(&border);
    out.push('\n');
    out
}
