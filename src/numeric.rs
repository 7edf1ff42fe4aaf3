//! 폼 입력 문자열을 숫자로 해석하고, 결과를 고정 소수점 문자열로 만드는 도우미.

/// `to_fixed`가 허용하는 최대 소수 자릿수.
pub const MAX_FRACTION_DIGITS: usize = 100;

/// 이 값 이상은 고정 소수점 대신 지수 표기로 출력한다.
const EXPONENTIAL_THRESHOLD: f64 = 1e21;

/// 유한한 f64의 십진 전개에 필요한 최대 소수 자릿수(최소 비정규수 기준).
const EXACT_FRACTION_DIGITS: usize = 1074;

/// 폼 입력 문자열을 숫자로 해석한다.
///
/// 앞뒤 공백을 뺀 문자열 전체가 `[+-]? 숫자 [. 숫자] [e [+-]? 숫자]` 형태여야 한다.
/// `12abc`, `150/mo`처럼 뒤에 다른 문자가 붙거나 빈 문자열이면 오류 대신 NaN을 돌려준다.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim();
    if is_decimal_literal(s.as_bytes()) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// 십진 리터럴 문법 검사. `inf`, `NaN` 같은 표기는 여기서 걸러진다.
fn is_decimal_literal(bytes: &[u8]) -> bool {
    let len = bytes.len();
    let mut i = 0;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == len
}

/// 값을 소수 `digits`자리 문자열로 만든다.
///
/// 이진 값 그대로의 십진 전개를 기준으로 반올림하며, 정확히 절반인 경우는 0에서 먼 쪽으로
/// 올린다. 그래서 `0.25`는 `0.3`이 되지만 `1.005`(실제 값은 1.00499...)는 `1.00`이 된다.
/// NaN/무한대는 `NaN`, `Infinity`, `-Infinity`로, 절댓값 1e21 이상은 지수 표기로 나온다.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= EXPONENTIAL_THRESHOLD {
        return format!("{value:e}").replacen('e', "e+", 1);
    }

    let digits = digits.min(MAX_FRACTION_DIGITS);
    let negative = value < 0.0;
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|d| *d >= b'5');
    if round_up && !increment_decimal(&mut kept) {
        kept.insert(0, b'1');
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|b| *b as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|b| *b as char));
    }
    out
}

/// 십진 숫자열에 1을 더한다. 맨 앞자리에서 올림이 넘치면 false.
fn increment_decimal(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return true;
        }
    }
    false
}
