/*!
# AptiCode Test-Case Tooling

Client-side helpers of the AptiCode coding-practice and aptitude-exam platform,
built in Rust.

## Overview

AptiCode runs user code against test cases whose inputs travel from the backend
as a small positional text format. Before results are rendered, the raw text is
decoded into named, typed values using a companion variable schema. Exam pages
additionally show a live countdown to the exam deadline.

## Wire Format

### Variable schema
One line per variable: `<name> <structure> <type>`, whitespace separated.
- `structure` is `array`, `number` or `string` (anything else reads as a string)
- `type` is `number` or `string` and only matters for arrays

### Raw test case
- Line 0: the variable count `N`
- Line `2i - 1`: label of variable `i` (not used for decoding)
- Line `2i`: value of variable `i`, space separated for arrays

```text
2          a number number
A          b array number
5
B
1 2 3
```
decodes to `{"a": 5, "b": [1, 2, 3]}`.

## Modules

- **schema**: Variable descriptors and schema parsing
- **testcase**: Splitting raw text into `(label, value)` pairs
- **value**: Decoded values, the not-a-number integer and the ordered result map
- **decoder**: Schema-driven decoding of raw test cases
- **encoder**: Writing structured input back into the raw format
- **countdown**: Remaining time until an exam deadline
- **error**: Decode and encode error types

## Numeric Parsing

Numbers are read with integer-prefix semantics: leading whitespace and a sign
are accepted and trailing characters are ignored. Text without leading digits
becomes [`Int::NAN`] rather than an error.
*/

pub mod countdown;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod schema;
pub mod testcase;
pub mod value;

/// Re-export the public surface so callers can `use apticode::*`
pub use countdown::*;
pub use decoder::*;
pub use encoder::*;
pub use error::*;
pub use schema::*;
pub use testcase::*;
pub use value::*;
