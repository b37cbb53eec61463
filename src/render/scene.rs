//! Scene quad emission
//!
//! Both backends consume the scene as a stream of colored quads: the software
//! path scanline-fills them, the GPU path batches them into a vertex buffer.
//! Keeping the per-tile color computation here means the CPU lighting path
//! has exactly one implementation regardless of which sink draws it.

use crate::iso::{self, ORIGIN_X, ORIGIN_Y, TILE_H, TILE_W};
use crate::lighting::{direct_with_occlusion, tonemap, Light, OcclusionCache, AMBIENT_COLOR};
use crate::map::Map;
use crate::player::Player;

/// Background behind the scene in both backends
pub const CLEAR_COLOR: [f32; 3] = [0.06, 0.06, 0.08];

/// Base color of a walkable tile before lighting
pub const WALKABLE_COLOR: [f32; 3] = [0.67, 0.59, 0.34];
/// Base color of a blocked tile before lighting
pub const BLOCKED_COLOR: [f32; 3] = [0.42, 0.30, 0.20];

/// Drop shadow under the player sprite
pub const SHADOW_COLOR: [f32; 3] = [0.10, 0.10, 0.12];
/// Player body quad
pub const BODY_COLOR: [f32; 3] = [0.2, 0.4, 0.85];

/// Receiver for screen-space colored quads
pub trait QuadSink {
    /// Emit one convex quad; corners are given in winding order
    fn quad(&mut self, corners: [(f32, f32); 4], color: [f32; 3]);
}

/// Diamond corners of a tile: left, top, right, bottom
pub fn tile_corners(tile_x: i32, tile_y: i32) -> [(f32, f32); 4] {
    let (sx, sy) = iso::tile_to_screen(tile_x, tile_y, TILE_W, TILE_H);
    let sx = ORIGIN_X + sx;
    let sy = ORIGIN_Y + sy;
    [
        (sx, sy + TILE_H * 0.5),
        (sx + TILE_W * 0.5, sy),
        (sx + TILE_W, sy + TILE_H * 0.5),
        (sx + TILE_W * 0.5, sy + TILE_H),
    ]
}

/// Lit color of one tile on the CPU lighting path.
///
/// Ambient (weighted by the fixed ambient color) plus both occlusion-aware
/// direct contributions, tonemapped, tinted, then multiplied into the tile's
/// base color.
pub fn shade_tile(
    blocked: bool,
    player_contribution: f32,
    lamp_contribution: f32,
    player_light: &Light,
    lamp_light: &Light,
    ambient: f32,
    tint: [f32; 3],
) -> [f32; 3] {
    let direct = [
        player_light.r * player_contribution + lamp_light.r * lamp_contribution,
        player_light.g * player_contribution + lamp_light.g * lamp_contribution,
        player_light.b * player_contribution + lamp_light.b * lamp_contribution,
    ];

    let base = if blocked { BLOCKED_COLOR } else { WALKABLE_COLOR };

    let mut color = [0.0; 3];
    for channel in 0..3 {
        let accumulated = AMBIENT_COLOR[channel] * ambient + direct[channel];
        let mapped = tonemap(accumulated);
        color[channel] = (mapped * tint[channel]).clamp(0.0, 1.0) * base[channel];
    }
    color
}

/// CPU lighting path: every tile shaded with occlusion-aware direct light,
/// then the player sprite on top
pub fn emit_lit(
    map: &Map,
    player: &Player,
    player_light: &Light,
    lamp_light: &Light,
    ambient: f32,
    tint: [f32; 3],
    sink: &mut impl QuadSink,
) {
    let mut player_occlusion = OcclusionCache::new(map.width(), map.height());
    let mut lamp_occlusion = OcclusionCache::new(map.width(), map.height());

    for y in 0..map.height() {
        for x in 0..map.width() {
            let player_contribution =
                direct_with_occlusion(map, x, y, player_light, &mut player_occlusion);
            let lamp_contribution =
                direct_with_occlusion(map, x, y, lamp_light, &mut lamp_occlusion);

            let color = shade_tile(
                map.is_blocked(x, y),
                player_contribution,
                lamp_contribution,
                player_light,
                lamp_light,
                ambient,
                tint,
            );
            sink.quad(tile_corners(x, y), color);
        }
    }

    emit_player(player, sink);
}

/// Albedo pass: flat base colors, lighting left to the GPU light pass
pub fn emit_albedo(map: &Map, player: &Player, sink: &mut impl QuadSink) {
    for y in 0..map.height() {
        for x in 0..map.width() {
            let color = if map.is_blocked(x, y) {
                BLOCKED_COLOR
            } else {
                WALKABLE_COLOR
            };
            sink.quad(tile_corners(x, y), color);
        }
    }

    emit_player(player, sink);
}

/// Player sprite: a drop shadow at the feet and a body quad animated by the
/// walk cycle (vertical bob, horizontal sway, both scaled by move blend)
fn emit_player(player: &Player, sink: &mut impl QuadSink) {
    let (wx, wy) = iso::world_to_screen(player.x(), player.y(), TILE_W, TILE_H);
    let sx = ORIGIN_X + wx + TILE_W * 0.5;
    let sy_base = ORIGIN_Y + wy + TILE_H * 0.5;

    let bob = (player.walk_phase() * 2.0).sin() * 2.5 * player.move_blend();
    let sway = player.walk_phase().sin() * 1.8 * player.move_blend();
    let sy = sy_base - bob;

    sink.quad(
        [
            (sx - 9.0, sy_base + 2.0),
            (sx + 9.0, sy_base + 2.0),
            (sx + 9.0, sy_base + 6.0),
            (sx - 9.0, sy_base + 6.0),
        ],
        SHADOW_COLOR,
    );

    sink.quad(
        [
            (sx - 8.0 + sway, sy - 20.0),
            (sx + 8.0 + sway, sy - 20.0),
            (sx + 8.0 - sway, sy),
            (sx - 8.0 - sway, sy),
        ],
        BODY_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::tonemap;

    struct RecordingSink {
        quads: Vec<([(f32, f32); 4], [f32; 3])>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { quads: Vec::new() }
        }
    }

    impl QuadSink for RecordingSink {
        fn quad(&mut self, corners: [(f32, f32); 4], color: [f32; 3]) {
            self.quads.push((corners, color));
        }
    }

    fn dark_light() -> Light {
        Light {
            x: 0.0,
            y: 0.0,
            radius: 4.0,
            intensity: 0.0,
            r: 1.0,
            g: 1.0,
            b: 1.0,
            falloff_exponent: 2.0,
        }
    }

    #[test]
    fn test_tile_corners_form_the_expected_diamond() {
        let corners = tile_corners(0, 0);
        assert_eq!(corners[0], (ORIGIN_X, ORIGIN_Y + TILE_H * 0.5));
        assert_eq!(corners[1], (ORIGIN_X + TILE_W * 0.5, ORIGIN_Y));
        assert_eq!(corners[2], (ORIGIN_X + TILE_W, ORIGIN_Y + TILE_H * 0.5));
        assert_eq!(corners[3], (ORIGIN_X + TILE_W * 0.5, ORIGIN_Y + TILE_H));
    }

    #[test]
    fn test_ambient_only_tile_color() {
        // With both lights dark and identity tint, the tile color is the
        // walkable base scaled by the tonemapped, ambient-weighted term.
        let map = Map::parse(".").unwrap();
        let player = Player::new(0.5, 0.5);
        let mut sink = RecordingSink::new();

        emit_lit(
            &map,
            &player,
            &dark_light(),
            &dark_light(),
            0.5,
            [1.0, 1.0, 1.0],
            &mut sink,
        );

        // One tile quad plus shadow and body
        assert_eq!(sink.quads.len(), 3);

        let (_, color) = sink.quads[0];
        for channel in 0..3 {
            let expected = WALKABLE_COLOR[channel] * tonemap(AMBIENT_COLOR[channel] * 0.5);
            assert!(
                (color[channel] - expected).abs() < 1e-6,
                "channel {}: got {}, expected {}",
                channel,
                color[channel],
                expected
            );
        }
    }

    #[test]
    fn test_blocked_tiles_use_blocked_base() {
        let map = Map::parse("#.").unwrap();
        let player = Player::new(1.5, 0.5);
        let mut sink = RecordingSink::new();

        emit_lit(
            &map,
            &player,
            &dark_light(),
            &dark_light(),
            1.0,
            [1.0, 1.0, 1.0],
            &mut sink,
        );

        let (_, blocked_color) = sink.quads[0];
        let (_, walkable_color) = sink.quads[1];
        for channel in 0..3 {
            let shade = tonemap(AMBIENT_COLOR[channel]);
            assert!((blocked_color[channel] - BLOCKED_COLOR[channel] * shade).abs() < 1e-6);
            assert!((walkable_color[channel] - WALKABLE_COLOR[channel] * shade).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tint_brightens_and_clamps() {
        let lit = shade_tile(false, 0.0, 0.0, &dark_light(), &dark_light(), 1.0, [2.0, 2.0, 2.0]);
        let flat = shade_tile(false, 0.0, 0.0, &dark_light(), &dark_light(), 1.0, [1.0, 1.0, 1.0]);
        for channel in 0..3 {
            assert!(lit[channel] >= flat[channel]);
            assert!(lit[channel] <= WALKABLE_COLOR[channel] + 1e-6);
        }
    }

    #[test]
    fn test_direct_light_raises_tile_brightness() {
        let near = Light {
            intensity: 0.9,
            x: 0.0,
            y: 0.0,
            ..dark_light()
        };
        let with_light =
            shade_tile(false, 0.8, 0.0, &near, &dark_light(), 0.2, [1.0, 1.0, 1.0]);
        let ambient_only =
            shade_tile(false, 0.0, 0.0, &near, &dark_light(), 0.2, [1.0, 1.0, 1.0]);
        assert!(with_light[0] > ambient_only[0]);
    }

    #[test]
    fn test_albedo_emits_flat_colors() {
        let map = Map::parse("#.").unwrap();
        let player = Player::new(1.5, 0.5);
        let mut sink = RecordingSink::new();

        emit_albedo(&map, &player, &mut sink);

        assert_eq!(sink.quads.len(), 4);
        assert_eq!(sink.quads[0].1, BLOCKED_COLOR);
        assert_eq!(sink.quads[1].1, WALKABLE_COLOR);
        assert_eq!(sink.quads[2].1, SHADOW_COLOR);
        assert_eq!(sink.quads[3].1, BODY_COLOR);
    }

    #[test]
    fn test_player_sprite_bobs_while_moving() {
        use crate::player::InputState;

        let map = Map::parse("....\n....\n....\n....\n").unwrap();
        let mut still = Player::new(2.0, 2.0);
        let mut moving = Player::new(2.0, 2.0);
        let input = InputState {
            right: true,
            ..InputState::default()
        };
        for _ in 0..10 {
            still.update(&InputState::default(), &map, 1.0 / 60.0);
            moving.update(&input, &map, 1.0 / 60.0);
        }

        let mut still_sink = RecordingSink::new();
        let mut moving_sink = RecordingSink::new();
        emit_player(&still, &mut still_sink);
        emit_player(&moving, &mut moving_sink);

        // Body quad is the second one; moving player's top edge is displaced
        let still_top = still_sink.quads[1].0[0].1;
        let moving_top = moving_sink.quads[1].0[0].1;
        assert!(still_top != moving_top || {
            // x displacement (sway) also counts as animation
            still_sink.quads[1].0[0].0 != moving_sink.quads[1].0[0].0
        });
    }
}
