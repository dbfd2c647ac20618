use image::{Rgb, RgbImage};
use itertools::Itertools;
use petgraph::graph::IndexType;

use crate::maze::{CompassPrimary, GridCoordinate, Maze};
use crate::units::CellPixels;
use crate::utils;
use crate::utils::FnvHashSet;

const BACKGROUND_COLOUR: Rgb<u8> = Rgb { data: [0x10, 0x10, 0x10] };
const CORRIDOR_COLOUR: Rgb<u8> = Rgb { data: [0xff, 0xff, 0xff] };
const PATH_COLOUR: Rgb<u8> = Rgb { data: [0xd0, 0x30, 0x30] };
const PLAYER_COLOUR: Rgb<u8> = Rgb { data: [0x30, 0xc0, 0x30] };
const GOAL_COLOUR: Rgb<u8> = Rgb { data: [0xe0, 0xc0, 0x20] };

/// What to overlay on top of the maze walls/corridors when rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    path: Option<Vec<GridCoordinate>>,
    player: Option<GridCoordinate>,
    goal: Option<GridCoordinate>,
    cell_pixels: CellPixels,
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                path: None,
                player: None,
                goal: None,
                cell_pixels: CellPixels(20),
            },
        }
    }

    pub fn path(mut self, path: Option<Vec<GridCoordinate>>) -> RenderOptionsBuilder {
        self.options.path = path;
        self
    }

    pub fn player(mut self, player: Option<GridCoordinate>) -> RenderOptionsBuilder {
        self.options.player = player;
        self
    }

    pub fn goal(mut self, goal: Option<GridCoordinate>) -> RenderOptionsBuilder {
        self.options.goal = goal;
        self
    }

    /// Clamped to at least one pixel per cell when built.
    pub fn cell_pixels(mut self, cell_pixels: CellPixels) -> RenderOptionsBuilder {
        self.options.cell_pixels = cell_pixels;
        self
    }

    pub fn build(self) -> RenderOptions {
        let mut options = self.options;
        // A zero scale would make a zero sized image and break the pixel fills.
        options.cell_pixels = CellPixels(::std::cmp::max(options.cell_pixels.0, 1));
        options
    }
}

impl RenderOptions {
    /// The 3 glyph wide body text of one cell: player, goal and solution route
    /// markers in that priority order.
    fn render_cell_body(&self, coord: GridCoordinate, on_path: &FnvHashSet<GridCoordinate>) -> &'static str {
        if self.player == Some(coord) {
            " @ "
        } else if self.goal == Some(coord) {
            " E "
        } else if on_path.contains(&coord) {
            " . "
        } else {
            "   "
        }
    }
}

/// Render the maze as Unicode box drawing text, one wall glyph per cell side.
pub fn render_text<GridIndexType>(maze: &Maze<GridIndexType>, options: &RenderOptions) -> String
    where GridIndexType: IndexType
{
    const WALL_L: &str = "╴";
    const WALL_R: &str = "╶";
    const WALL_U: &str = "╵";
    const WALL_D: &str = "╷";
    const WALL_LR_3: &str = "───";
    const WALL_LR: &str = "─";
    const WALL_UD: &str = "│";
    const WALL_LD: &str = "┐";
    const WALL_RU: &str = "└";
    const WALL_LU: &str = "┘";
    const WALL_RD: &str = "┌";
    const WALL_LRU: &str = "┴";
    const WALL_LRD: &str = "┬";
    const WALL_LRUD: &str = "┼";
    const WALL_RUD: &str = "├";
    const WALL_LUD: &str = "┤";

    let columns_count = maze.width().0;
    let rows_count = maze.height().0;
    let mut on_path: FnvHashSet<GridCoordinate> =
        utils::fnv_hashset(options.path.as_ref().map_or(0, Vec::len));
    if let Some(ref path) = options.path {
        on_path.extend(path.iter().cloned());
    }

    // Special case the north most boundary, the only row edge no cell body owns.
    let mut output = String::from(WALL_RD);
    let first_grid_row: Vec<GridCoordinate> =
        maze.iter_row().next().expect("a maze has at least one row");
    for (index, coord) in first_grid_row.iter().enumerate() {
        output.push_str(WALL_LR_3);
        let is_east_open = maze.is_neighbour_linked(*coord, CompassPrimary::East);
        if is_east_open {
            output.push_str(WALL_LR);
        } else {
            let is_last_cell = index == columns_count - 1;
            if is_last_cell {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
    }
    output.push('\n');

    for (index_row, row) in maze.iter_row().enumerate() {

        let is_last_row = index_row == rows_count - 1;

        // Each cell uses the southern wall of the cell above as its own northern
        // wall, so only the body, the eastern boundary and the southern boundary
        // with its corner glyph are rendered here. The west most boundary of the
        // row is the remaining special case.
        let mut row_middle_section_render = String::from(WALL_UD);
        let mut row_bottom_section_render = String::new();

        for (index_column, cell_coord) in row.into_iter().enumerate() {

            let render_cell_side = |direction, passage_clear_text, blocking_wall_text| {
                maze.neighbour_at_direction(cell_coord, direction)
                    .map_or(blocking_wall_text, |neighbour_coord| {
                        if maze.is_linked(cell_coord, neighbour_coord) {
                            passage_clear_text
                        } else {
                            blocking_wall_text
                        }
                    })
            };
            let is_first_column = index_column == 0;
            let is_last_column = index_column == columns_count - 1;
            let east_open = maze.is_neighbour_linked(cell_coord, CompassPrimary::East);
            let south_open = maze.is_neighbour_linked(cell_coord, CompassPrimary::South);

            let body = options.render_cell_body(cell_coord, &on_path);
            let east_boundary = render_cell_side(CompassPrimary::East, " ", WALL_UD);
            row_middle_section_render.push_str(body);
            row_middle_section_render.push_str(east_boundary);

            if is_first_column {
                row_bottom_section_render = if is_last_row {
                    String::from(WALL_RU)
                } else if south_open {
                    String::from(WALL_UD)
                } else {
                    String::from(WALL_RUD)
                };
            }
            let south_boundary = render_cell_side(CompassPrimary::South, "   ", WALL_LR_3);
            row_bottom_section_render.push_str(south_boundary);

            let corner = match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => {
                    if east_open {
                        WALL_LR
                    } else {
                        WALL_LRU
                    }
                }
                (false, true) => {
                    if south_open {
                        WALL_UD
                    } else {
                        WALL_LUD
                    }
                }
                (false, false) => {
                    let access_se_from_east =
                        maze.neighbour_at_direction(cell_coord, CompassPrimary::East)
                            .map_or(false,
                                    |c| maze.is_neighbour_linked(c, CompassPrimary::South));
                    let access_se_from_south =
                        maze.neighbour_at_direction(cell_coord, CompassPrimary::South)
                            .map_or(false,
                                    |c| maze.is_neighbour_linked(c, CompassPrimary::East));
                    let show_right_section = !access_se_from_east;
                    let show_down_section = !access_se_from_south;
                    let show_up_section = !east_open;
                    let show_left_section = !south_open;

                    match (show_left_section,
                           show_right_section,
                           show_up_section,
                           show_down_section) {
                        (true, true, true, true) => WALL_LRUD,
                        (true, true, true, false) => WALL_LRU,
                        (true, true, false, true) => WALL_LRD,
                        (true, false, true, true) => WALL_LUD,
                        (false, true, true, true) => WALL_RUD,
                        (true, true, false, false) => WALL_LR,
                        (false, false, true, true) => WALL_UD,
                        (false, true, true, false) => WALL_RU,
                        (true, false, false, true) => WALL_LD,
                        (true, false, true, false) => WALL_LU,
                        (false, true, false, true) => WALL_RD,
                        (true, false, false, false) => WALL_L,
                        (false, true, false, false) => WALL_R,
                        (false, false, true, false) => WALL_U,
                        (false, false, false, true) => WALL_D,
                        _ => " ",
                    }
                }
            };

            row_bottom_section_render.push_str(corner);
        }

        output.push_str(&row_middle_section_render);
        output.push('\n');
        output.push_str(&row_bottom_section_render);
        output.push('\n');
    }

    output
}

/// Render the maze to an image: corridors as bright strokes joining the centres
/// of linked cells on a dark background, with the solution route, player and
/// goal drawn over the top.
pub fn render_image<GridIndexType>(maze: &Maze<GridIndexType>, options: &RenderOptions) -> RgbImage
    where GridIndexType: IndexType
{
    let scale = options.cell_pixels.0 as u32;
    let image_width = maze.width().0 as u32 * scale;
    let image_height = maze.height().0 as u32 * scale;
    let mut image = RgbImage::from_pixel(image_width, image_height, BACKGROUND_COLOUR);

    for (a, b) in maze.iter_links() {
        draw_corridor(&mut image, a, b, scale, CORRIDOR_COLOUR);
    }

    if let Some(ref path) = options.path {
        for (a, b) in path.iter().cloned().tuple_windows::<(_, _)>() {
            draw_corridor(&mut image, a, b, scale, PATH_COLOUR);
        }
    }
    if let Some(goal) = options.goal {
        draw_cell_marker(&mut image, goal, scale, GOAL_COLOUR);
    }
    if let Some(player) = options.player {
        draw_cell_marker(&mut image, player, scale, PLAYER_COLOUR);
    }

    image
}

/// Write the image as a PNG file, with the format picked from the extension.
pub fn save_png(image: &RgbImage, file_path: &::std::path::Path) -> ::std::io::Result<()> {
    image.save(file_path)
}

fn cell_centre(coord: GridCoordinate, scale: u32) -> (u32, u32) {
    (coord.x * scale + scale / 2, coord.y * scale + scale / 2)
}

/// A thick stroke between the centres of two cells. Linked cells are always grid
/// neighbours so the stroke is axis aligned.
fn draw_corridor(image: &mut RgbImage,
                 a: GridCoordinate,
                 b: GridCoordinate,
                 scale: u32,
                 colour: Rgb<u8>) {
    let thickness = ::std::cmp::max(scale / 2, 1);
    let half = thickness / 2;
    let (ax, ay) = cell_centre(a, scale);
    let (bx, by) = cell_centre(b, scale);

    let x0 = ::std::cmp::min(ax, bx).saturating_sub(half);
    let y0 = ::std::cmp::min(ay, by).saturating_sub(half);
    let x1 = ::std::cmp::max(ax, bx) + half;
    let y1 = ::std::cmp::max(ay, by) + half;
    fill_rect(image, x0, y0, x1, y1, colour);
}

fn draw_cell_marker(image: &mut RgbImage, coord: GridCoordinate, scale: u32, colour: Rgb<u8>) {
    let half = ::std::cmp::max(scale / 4, 1);
    let (cx, cy) = cell_centre(coord, scale);
    fill_rect(image,
              cx.saturating_sub(half),
              cy.saturating_sub(half),
              cx + half,
              cy + half,
              colour);
}

fn fill_rect(image: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, colour: Rgb<u8>) {
    let x_max = ::std::cmp::min(x1, image.width() - 1);
    let y_max = ::std::cmp::min(y1, image.height() - 1);
    for y in y0..=y_max {
        for x in x0..=x_max {
            image.put_pixel(x, y, colour);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators;
    use crate::maze::SmallMaze;
    use crate::units::{Height, Width};

    use rand::{SeedableRng, XorShiftRng};

    fn options() -> RenderOptions {
        RenderOptionsBuilder::new().build()
    }

    #[test]
    fn single_cell_text_render() {
        let maze = SmallMaze::new(Width(1), Height(1)).unwrap();
        assert_eq!(render_text(&maze, &options()), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn two_cell_corridor_text_render() {
        let mut maze = SmallMaze::new(Width(2), Height(1)).unwrap();
        maze.link(GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)).unwrap();
        assert_eq!(render_text(&maze, &options()), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn text_render_line_count() {
        let mut maze = SmallMaze::new(Width(5), Height(4)).unwrap();
        let mut rng = XorShiftRng::from_seed([8, 9, 10, 11]);
        generators::frontier_growth(&mut maze, &mut rng);

        // One north boundary line plus a body line and a south boundary line per row.
        let rendered = render_text(&maze, &options());
        assert_eq!(rendered.lines().count(), 1 + 2 * 4);
    }

    #[test]
    fn text_render_marks_player_goal_and_path() {
        let mut maze = SmallMaze::new(Width(3), Height(1)).unwrap();
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(1, 0);
        let c = GridCoordinate::new(2, 0);
        maze.link(a, b).unwrap();
        maze.link(b, c).unwrap();

        let options = RenderOptionsBuilder::new()
            .path(Some(vec![a, b, c]))
            .player(Some(a))
            .goal(Some(c))
            .build();
        let rendered = render_text(&maze, &options);
        assert_eq!(rendered.matches('@').count(), 1);
        assert_eq!(rendered.matches('E').count(), 1);
        // The player and goal markers shadow the path marker on their own cells.
        assert_eq!(rendered.matches('.').count(), 1);
    }

    #[test]
    fn display_delegates_to_text_render() {
        let maze = SmallMaze::new(Width(1), Height(1)).unwrap();
        assert_eq!(format!("{}", maze), render_text(&maze, &options()));
    }

    #[test]
    fn image_dimensions_follow_cell_pixels() {
        let maze = SmallMaze::new(Width(4), Height(3)).unwrap();
        let options = RenderOptionsBuilder::new().cell_pixels(CellPixels(10)).build();
        let image = render_image(&maze, &options);
        assert_eq!(image.width(), 40);
        assert_eq!(image.height(), 30);
    }

    #[test]
    fn zero_cell_pixels_is_clamped_to_one() {
        let mut maze = SmallMaze::new(Width(2), Height(1)).unwrap();
        maze.link(GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)).unwrap();

        let options = RenderOptionsBuilder::new().cell_pixels(CellPixels(0)).build();
        let image = render_image(&maze, &options);
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
    }

    #[test]
    fn corridors_are_drawn_between_linked_cells() {
        let mut maze = SmallMaze::new(Width(2), Height(1)).unwrap();
        maze.link(GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)).unwrap();

        let image = render_image(&maze, &options());
        // Midway between the two cell centres is corridor, the image corner is not.
        assert_eq!(*image.get_pixel(20, 10), CORRIDOR_COLOUR);
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND_COLOUR);
    }

    #[test]
    fn player_marker_overdraws_the_corridor() {
        let mut maze = SmallMaze::new(Width(2), Height(1)).unwrap();
        let a = GridCoordinate::new(0, 0);
        maze.link(a, GridCoordinate::new(1, 0)).unwrap();

        let options = RenderOptionsBuilder::new().player(Some(a)).build();
        let image = render_image(&maze, &options);
        assert_eq!(*image.get_pixel(10, 10), PLAYER_COLOUR);
    }
}
