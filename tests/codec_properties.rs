use lsb_stego::{
    BitDepth, EmbedError, FrameError, HeaderFault, LsbCodec, StegaError, embed, extract,
    frame::{encode_frame, frame_len},
    permutation::Permutation,
    slots::SlotAllocator,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

const DEPTHS: [u8; 4] = [1, 2, 4, 8];
const SEEDS: [Option<u64>; 4] = [None, Some(0), Some(1), Some(12345)];

fn random_carrier(len: usize, seed: u64) -> Vec<u8> {
    let mut carrier = vec![0u8; len];
    ChaCha8Rng::seed_from_u64(seed).fill_bytes(&mut carrier);
    carrier
}

fn depth(bits: u8) -> BitDepth {
    BitDepth::new(bits).unwrap()
}

/// 所有位深度与密钥组合下的往返
#[test]
fn round_trip_across_depths_and_seeds() {
    let messages: [&[u8]; 4] = [b"", b"Hi", b"The quick brown fox jumps over the lazy dog", b"%%%"];
    for bits in DEPTHS {
        for seed in SEEDS {
            for message in messages {
                let mut carrier = random_carrier(2048, 99);
                embed(&mut carrier, message, seed, depth(bits)).unwrap();
                let recovered = extract(&carrier, seed, depth(bits)).unwrap();
                assert_eq!(recovered, message, "B={bits} seed={seed:?}");
            }
        }
    }
}

/// 所有字节值 (不只是 ASCII) 都能往返
#[test]
fn round_trip_preserves_arbitrary_bytes() {
    let message: Vec<u8> = (0..=u8::MAX).collect();
    for bits in 1..=8 {
        let codec = LsbCodec::new(depth(bits), Some(7));
        let mut carrier = random_carrier(4096, u64::from(bits));
        codec.embed(&mut carrier, &message).unwrap();
        assert_eq!(codec.extract(&carrier).unwrap(), message, "B={bits}");
    }
}

/// 文档中的示例：1000 个零字节，"Hi"，B=2，无密钥
#[test]
fn example_scenario() {
    let mut carrier = vec![0u8; 1000];
    let codec = LsbCodec::default();
    assert_eq!(encode_frame(b"Hi"), b"2%Hi");

    codec.embed(&mut carrier, b"Hi").unwrap();

    // '2' = 0x32 -> 低位块在前：[2, 0, 3, 0]
    assert_eq!(&carrier[..4], &[2, 0, 3, 0]);
    assert!(carrier[16..].iter().all(|&u| u == 0));
    assert_eq!(codec.extract(&carrier).unwrap(), b"Hi");
}

/// 未被选中的存储单元逐位不变，被写入的单元高位不变
#[test]
fn untouched_units_and_high_bits_are_preserved() {
    let message = b"covert channel";
    let frame_chars = frame_len(message.len());
    for bits in 1..=8 {
        for seed in SEEDS {
            let original = random_carrier(1001, 5);
            let mut carrier = original.clone();
            embed(&mut carrier, message, seed, depth(bits)).unwrap();

            let slots = SlotAllocator::new(original.len(), depth(bits), seed);
            let touched: HashSet<usize> = (0..frame_chars)
                .flat_map(|slot| slots.offsets_for_slot(slot).unwrap())
                .collect();
            let high = depth(bits).high_mask();

            for (i, (&before, &after)) in original.iter().zip(&carrier).enumerate() {
                if touched.contains(&i) {
                    assert_eq!(before & high, after & high, "unit {i} B={bits} seed={seed:?}");
                } else {
                    assert_eq!(before, after, "unit {i} B={bits} seed={seed:?}");
                }
            }
        }
    }
}

/// 恰好填满所有槽位成功，多一个字符则失败且载体不被修改
#[test]
fn capacity_boundary() {
    // B=2 -> U=4，80 个单元共 20 个槽位；"17%" + 17 个字符正好 20
    for seed in SEEDS {
        let mut carrier = random_carrier(80, 3);
        let fits = vec![b'x'; 17];
        embed(&mut carrier, &fits, seed, BitDepth::default()).unwrap();
        assert_eq!(extract(&carrier, seed, BitDepth::default()).unwrap(), fits);

        let original = random_carrier(80, 4);
        let mut carrier = original.clone();
        let too_long = vec![b'x'; 18];
        let err = embed(&mut carrier, &too_long, seed, BitDepth::default()).unwrap_err();
        assert_eq!(
            err,
            EmbedError::CapacityExceeded {
                required: 21,
                available: 20
            }
        );
        assert_eq!(carrier, original, "a failed embed must not write anything");
    }
}

#[test]
fn capacity_matches_max_payload() {
    let codec = LsbCodec::new(depth(4), None);
    assert_eq!(codec.total_slots(1000), 500);
    let max = codec.capacity(1000).unwrap();
    assert_eq!(max, 496);

    let mut carrier = vec![0u8; 1000];
    codec.embed(&mut carrier, &vec![b'a'; max]).unwrap();
    assert!(codec.embed(&mut carrier, &vec![b'a'; max + 1]).is_err());
    assert_eq!(LsbCodec::default().capacity(7), None);
}

#[test]
fn permutation_is_deterministic_per_seed() {
    let a = Permutation::generate(500, 12345);
    let b = Permutation::generate(500, 12345);
    assert_eq!(a, b);

    let c = Permutation::generate(500, 12346);
    assert_ne!(a, c);
    assert!(a.as_slice().iter().zip(c.as_slice()).any(|(x, y)| x != y));
}

#[test]
fn permutation_is_not_a_rotation() {
    let perm = Permutation::generate(64, 1);
    let first = perm.as_slice()[0];
    let rotation: Vec<usize> = (0..64).map(|i| (first + i) % 64).collect();
    assert_ne!(perm.as_slice(), rotation.as_slice());
}

/// 载荷中的分隔符不影响帧头解析
#[test]
fn delimiter_inside_payload() {
    for seed in SEEDS {
        let mut carrier = random_carrier(512, 8);
        embed(&mut carrier, b"50% done", seed, BitDepth::default()).unwrap();
        assert_eq!(
            extract(&carrier, seed, BitDepth::default()).unwrap(),
            b"50% done"
        );
    }
}

/// 没有分隔符时扫描以总槽位数为上限
#[test]
fn missing_delimiter_is_bounded() {
    // 全零单元解码为 NUL 字符，永远不会出现 '%'
    let carrier = vec![0u8; 400];
    let err = extract(&carrier, None, BitDepth::default()).unwrap_err();
    assert!(matches!(
        err,
        StegaError::Frame(FrameError::MalformedHeader(HeaderFault::DelimiterNotFound {
            scanned: 100
        }))
    ));
}

#[test]
fn non_numeric_header_is_rejected() {
    let codec = LsbCodec::default();
    let mut raw = vec![0u8; 400];
    codec.embed(&mut raw, b"x").unwrap();
    // 把帧的前三个字符改写为 "ab%"
    for (slot, c) in b"ab%".iter().enumerate() {
        let units: Vec<u8> = lsb_stego::bits::char_to_units(*c, BitDepth::default()).collect();
        raw[slot * 4..slot * 4 + 4].copy_from_slice(&units);
    }

    let err = codec.extract(&raw).unwrap_err();
    assert!(matches!(
        err,
        StegaError::Frame(FrameError::MalformedHeader(HeaderFault::NotANumber(ref s))) if s == "ab"
    ));
}

/// 声明长度超过剩余槽位时报告容量不足
#[test]
fn truncated_carrier_is_reported() {
    let codec = LsbCodec::new(depth(8), None);
    let mut carrier = vec![0u8; 64];
    codec.embed(&mut carrier, &[b'z'; 40]).unwrap();

    let err = codec.extract(&carrier[..20]).unwrap_err();
    assert!(matches!(
        err,
        StegaError::Embed(EmbedError::CapacityExceeded {
            required: 43,
            available: 20
        })
    ));
}

/// 随机消息与随机密钥的往返
#[test]
fn random_messages_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..50 {
        let bits = rng.random_range(1..=8u8);
        let seed = rng.random_bool(0.5).then(|| rng.next_u64());
        let len = rng.random_range(0..200usize);
        let mut message = vec![0u8; len];
        rng.fill_bytes(&mut message);

        let mut carrier = random_carrier(2000, rng.next_u64());
        embed(&mut carrier, &message, seed, depth(bits)).unwrap();
        assert_eq!(extract(&carrier, seed, depth(bits)).unwrap(), message);
    }
}
