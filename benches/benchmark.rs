// Copyright 2021 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! fixed-decimal-rs benchmark

use bencher::{benchmark_group, benchmark_main, black_box, Bencher};
use fixed_decimal::{Arithmetic, Decimal, RoundingMode};
use std::convert::TryFrom;

type D9 = Decimal<9>;

#[inline(always)]
fn parse(s: &str) -> D9 {
    s.parse().unwrap()
}

#[inline(always)]
fn arith() -> Arithmetic {
    Arithmetic::with_scale(9, RoundingMode::HalfEven.checked()).unwrap()
}

fn decimal_parse(bench: &mut Bencher) {
    bench.iter(|| {
        let _n = parse(black_box("12345678.123456789"));
    })
}

fn decimal_to_string(bench: &mut Bencher) {
    let val = parse("12345678.123456789");
    bench.iter(|| {
        let _n = black_box(&val).to_string();
    })
}

#[allow(clippy::excessive_precision)]
fn decimal_from_f64(bench: &mut Bencher) {
    bench.iter(|| {
        let _n = D9::try_from(black_box(12345678.123456789_f64)).unwrap();
    })
}

fn decimal_into_f64(bench: &mut Bencher) {
    let val = parse("12345678.123456789");
    bench.iter(|| {
        black_box(f64::from(black_box(val)));
    })
}

fn decimal_add(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    let y = parse("87654321.987654321");
    bench.iter(|| {
        let _n = black_box(x) + black_box(y);
    })
}

fn decimal_sub(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    let y = parse("87654321.987654321");
    bench.iter(|| {
        let _n = black_box(x) - black_box(y);
    })
}

fn decimal_mul(bench: &mut Bencher) {
    let x = parse("12345.123456789");
    let y = parse("54321.987654321");
    bench.iter(|| {
        let _n = black_box(x) * black_box(y);
    })
}

fn decimal_div(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    let y = parse("54321.987654321");
    bench.iter(|| {
        let _n = black_box(x) / black_box(y);
    })
}

fn decimal_rem(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    let y = parse("54321.987654321");
    bench.iter(|| {
        let _n = black_box(x) % black_box(y);
    })
}

fn decimal_cmp(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    let y = parse("87654321.987654321");
    bench.iter(|| {
        let _n = black_box(x) > black_box(y);
    })
}

fn decimal_sqrt(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    bench.iter(|| {
        let _n = black_box(x).sqrt().unwrap();
    })
}

fn decimal_pow(bench: &mut Bencher) {
    let x = parse("1.000123456");
    bench.iter(|| {
        let _n = black_box(x).pow(black_box(100)).unwrap();
    })
}

fn decimal_round(bench: &mut Bencher) {
    let x = parse("12345678.123456789");
    bench.iter(|| {
        let _n = black_box(x).round(black_box(2)).unwrap();
    })
}

fn arith_divide_by_scale_factor(bench: &mut Bencher) {
    let arith = arith();
    bench.iter(|| {
        let _n = arith.to_long(black_box(12_345_678_123_456_789)).unwrap();
    })
}

fn arith_multiply(bench: &mut Bencher) {
    let arith = arith();
    bench.iter(|| {
        let _n = arith
            .multiply(black_box(12_345_123_456_789), black_box(54_321_987_654_321))
            .unwrap();
    })
}

benchmark_group!(
    decimal_benches,
    decimal_parse,
    decimal_to_string,
    decimal_from_f64,
    decimal_into_f64,
    decimal_add,
    decimal_sub,
    decimal_mul,
    decimal_div,
    decimal_rem,
    decimal_cmp,
    decimal_sqrt,
    decimal_pow,
    decimal_round,
    arith_divide_by_scale_factor,
    arith_multiply,
);

benchmark_main!(decimal_benches);
