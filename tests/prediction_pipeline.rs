//! 预测流水线集成测试.
//!
//! 通过 `vpred` 门面串联帧内逐块重建、帧间平移补偿、AMVP 与多线程运动补偿.

use rayon::prelude::*;
use vpred::core::{
    BitDepth, BlockGeometry, BlockMut, Component, MotionVector, MvField, Neighbors, Picture,
    PredictionConfig, Sample, YuvBuffer,
};
use vpred::engine::{
    AmvpInfo, AmvpMode, InterPredictor, IntraPredictor, PredictionUnit, select_mvp,
};

const BLOCK: usize = 8;

/// 让预测器创建时的 log 调试输出进入测试捕获
fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build_textured_picture(width: usize, height: usize, seed: u32) -> Picture {
    let mut pic = Picture::new(width, height, Picture::default_margin(64), BitDepth::EIGHT)
        .expect("创建图像失败");
    let mut state = seed;
    for component in Component::ALL {
        let plane = pic.plane_mut(component);
        for y in 0..plane.height() as isize {
            for x in 0..plane.width() as isize {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                plane.set(x, y, ((state >> 16) & 0xFF) as Sample);
            }
        }
    }
    pic.extend_borders();
    pic
}

/// 光栅顺序下块 (bx, by) 的邻居可用性 (左下方尚未重建)
fn raster_neighbors(bx: usize, by: usize, blocks_per_row: usize) -> Neighbors {
    let mut flags = Neighbors::from_above_left(by > 0, bx > 0);
    if by > 0 && bx + 1 < blocks_per_row {
        flags |= Neighbors::ABOVE_RIGHT;
    }
    flags
}

/// 不加残差, 以预测值逐块重建整个亮度平面
fn reconstruct_intra_frame(
    intra: &IntraPredictor,
    size: usize,
    mode_of: impl Fn(usize) -> u8,
) -> Picture {
    let mut pic = Picture::new(size, size, Picture::default_margin(64), BitDepth::EIGHT)
        .expect("创建图像失败");
    let blocks_per_row = size / BLOCK;
    let mut out = vec![0 as Sample; BLOCK * BLOCK];
    for by in 0..blocks_per_row {
        for bx in 0..blocks_per_row {
            let block = BlockGeometry::new(bx * BLOCK, by * BLOCK, BLOCK, BLOCK);
            let mode = mode_of(by * blocks_per_row + bx);
            intra.predict_in_plane(
                pic.plane(Component::Luma),
                &block,
                mode,
                Component::Luma,
                raster_neighbors(bx, by, blocks_per_row),
                &mut BlockMut::new(&mut out, BLOCK),
            );
            let plane = pic.plane_mut(Component::Luma);
            for y in 0..BLOCK {
                for x in 0..BLOCK {
                    plane.set(
                        (block.x + x) as isize,
                        (block.y + y) as isize,
                        out[y * BLOCK + x],
                    );
                }
            }
        }
    }
    pic
}

#[test]
fn test_intra_frame_without_residual_stays_mid_grey() {
    init_test_logger();
    let intra = IntraPredictor::new(&PredictionConfig::default()).expect("创建帧内预测器失败");
    // 首块没有任何邻居, 取中间值; 之后所有模式都只能传播该常数
    let pic = reconstruct_intra_frame(&intra, 32, |index| (index * 7 % 35) as u8);
    let plane = pic.plane(Component::Luma);
    for y in 0..32isize {
        for x in 0..32isize {
            assert_eq!(plane.get(x, y), 128, "无残差重建应处处为 128: ({x}, {y})");
        }
    }
}

#[test]
fn test_intra_vertical_propagates_first_row() {
    init_test_logger();
    let intra = IntraPredictor::new(&PredictionConfig::default()).expect("创建帧内预测器失败");
    let mut pic = Picture::new(16, 16, Picture::default_margin(64), BitDepth::EIGHT)
        .expect("创建图像失败");
    {
        let plane = pic.plane_mut(Component::Luma);
        for x in 0..16isize {
            plane.set(x, 0, (x * 10) as Sample);
        }
    }
    // 第二行起的 8x8 块, 只有上方与右上可用
    let mut out = vec![0 as Sample; BLOCK * BLOCK];
    intra.predict_in_plane(
        pic.plane(Component::Luma),
        &BlockGeometry::new(0, 1, BLOCK, BLOCK),
        0,
        Component::Luma,
        Neighbors::ABOVE | Neighbors::ABOVE_RIGHT,
        &mut BlockMut::new(&mut out, BLOCK),
    );
    for row in out.chunks(BLOCK) {
        let expected: Vec<Sample> = (0..BLOCK as Sample).map(|x| x * 10).collect();
        assert_eq!(row, expected.as_slice(), "垂直模式应逐列复制上方样本");
    }
}

#[test]
fn test_integer_translation_reproduces_reference() {
    init_test_logger();
    let reference = vec![build_textured_picture(64, 64, 21)];
    let config = PredictionConfig::default();
    let mut inter = InterPredictor::new(&config).expect("创建帧间预测器失败");

    // 亮度平移 (6, -4), 色度平移 (3, -2)
    let geometry = BlockGeometry::new(16, 16, 16, 16);
    let pu = PredictionUnit::uni(geometry, 0, MvField::new(0, MotionVector::new(24, -16)));
    let mut out = YuvBuffer::new(16, 16);
    inter.motion_compensation(
        &pu,
        [reference.as_slice(), &[]],
        None,
        true,
        &mut out.as_block_mut(),
    );

    let luma = reference[0].plane(Component::Luma);
    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(
                out.plane(Component::Luma)[y * 16 + x],
                luma.get(22 + x as isize, 12 + y as isize),
                "亮度整像素平移不符: ({x}, {y})"
            );
        }
    }
    for component in [Component::Cb, Component::Cr] {
        let chroma = reference[0].plane(component);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(
                    out.plane(component)[y * 8 + x],
                    chroma.get(11 + x as isize, 6 + y as isize),
                    "色度整像素平移不符: {component:?} ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn test_amvp_selection_drives_motion_compensation() {
    init_test_logger();
    let reference = vec![build_textured_picture(64, 64, 33)];
    let mut inter =
        InterPredictor::new(&PredictionConfig::default()).expect("创建帧间预测器失败");
    let info = AmvpInfo::from_candidates(&[MotionVector::new(4, 0), MotionVector::new(-8, 12)]);
    let selection = select_mvp(&info, AmvpMode::Explicit, 1);
    assert!(selection.signaled);
    let mv = selection.mv.add(MotionVector::new(3, -5));
    assert_eq!(mv, MotionVector::new(-5, 7));

    let geometry = BlockGeometry::new(24, 24, 8, 8);
    let mut via_amvp = YuvBuffer::new(8, 8);
    inter.motion_compensation(
        &PredictionUnit::uni(geometry, 0, MvField::new(0, mv)),
        [reference.as_slice(), &[]],
        None,
        true,
        &mut via_amvp.as_block_mut(),
    );
    let mut direct = YuvBuffer::new(8, 8);
    inter.motion_compensation(
        &PredictionUnit::uni(geometry, 0, MvField::new(0, MotionVector::new(-5, 7))),
        [reference.as_slice(), &[]],
        None,
        true,
        &mut direct.as_block_mut(),
    );
    for component in Component::ALL {
        assert_eq!(via_amvp.plane(component), direct.plane(component));
    }
}

#[test]
fn test_parallel_motion_compensation_matches_sequential() {
    init_test_logger();
    let l0 = vec![build_textured_picture(64, 64, 5), build_textured_picture(64, 64, 6)];
    let l1 = vec![build_textured_picture(64, 64, 7)];
    let config = PredictionConfig::default();

    let units: Vec<PredictionUnit> = (0..16usize)
        .map(|i| {
            let geometry = BlockGeometry::new((i % 4) * 16, (i / 4) * 16, 16, 16);
            let i = i as i32;
            let f0 = MvField::new((i % 2) as i8, MotionVector::new(i * 3 - 20, 11 - i * 2));
            let f1 = MvField::new(0, MotionVector::new(7 - i, i * 5 - 33));
            match i % 3 {
                0 => PredictionUnit::uni(geometry, 0, f0),
                1 => PredictionUnit::uni(geometry, 1, f1),
                _ => PredictionUnit::bi(geometry, f0, f1),
            }
        })
        .collect();

    let predict = |inter: &mut InterPredictor, pu: &PredictionUnit| {
        let mut out = YuvBuffer::new(pu.geometry.width, pu.geometry.height);
        inter.motion_compensation(
            pu,
            [l0.as_slice(), l1.as_slice()],
            None,
            true,
            &mut out.as_block_mut(),
        );
        out
    };

    let mut inter = InterPredictor::new(&config).expect("创建帧间预测器失败");
    let sequential: Vec<YuvBuffer> = units.iter().map(|pu| predict(&mut inter, pu)).collect();

    // 每个工作线程持有独立的预测器与暂存区
    let parallel: Vec<YuvBuffer> = units
        .par_iter()
        .map_init(
            || InterPredictor::new(&config).expect("创建帧间预测器失败"),
            |inter, pu| predict(inter, pu),
        )
        .collect();

    for (index, (a, b)) in sequential.iter().zip(&parallel).enumerate() {
        for component in Component::ALL {
            assert_eq!(
                a.plane(component),
                b.plane(component),
                "并行结果与顺序结果不一致: pu={index}, {component:?}"
            );
        }
    }
}
