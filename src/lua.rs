//! Noise primitives exposed to Lua
//!
//! Registers Factorio-style globals so map-generation expressions can be
//! prototyped against the reproduced noise:
//!
//! - `random_generator(seed)` - generator userdata with `next_int`,
//!   `next_int_between` and `next_float` methods
//! - `basis_noise{x, y, seed0, seed1}`
//! - `multioctave_noise{x, y, seed0, seed1, octaves, persistence}`
//! - `noise_function{functionName, seed0, seed1, octaveCount, persistence}`
//!   returning a compiled `function(x, y)`

use factorio_noise::{NoiseSpec, RandomGenerator, MULTIOCTAVE_NOISE_FUNCTION};
use mlua::{Lua, Result as LuaResult, Table, UserData, UserDataMethods};

use crate::error::Result;

struct LuaRandomGenerator(RandomGenerator);

impl UserData for LuaRandomGenerator {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method_mut("next_int", |_, this, ()| Ok(this.0.next_int()));
        methods.add_method_mut("next_int_between", |_, this, (min, max): (i64, i64)| {
            if min == max {
                return Err(mlua::Error::runtime(format!("empty range [{min}, {max})")));
            }
            Ok(this.0.next_int_between(min, max))
        });
        methods.add_method_mut("next_float", |_, this, ()| Ok(this.0.next_float()));
    }
}

fn spec_from_table(args: &Table) -> LuaResult<NoiseSpec> {
    Ok(NoiseSpec {
        function_name: args
            .get::<Option<String>>("functionName")?
            .unwrap_or_else(|| MULTIOCTAVE_NOISE_FUNCTION.to_owned()),
        seed0: args.get("seed0")?,
        seed1: args.get("seed1")?,
        octave_count: args.get("octaveCount")?,
        persistence: args.get("persistence")?,
    })
}

/// Register all noise primitives as Lua globals
pub fn register_noise_functions(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    let random_generator_fn =
        lua.create_function(|_, seed: i64| Ok(LuaRandomGenerator(RandomGenerator::for_seed_i64(seed))))?;
    globals.set("random_generator", random_generator_fn)?;

    let basis_noise_fn = lua.create_function(|_, args: Table| {
        let x: f64 = args.get("x")?;
        let y: f64 = args.get("y")?;
        let spec = NoiseSpec::basis(args.get("seed0")?, args.get("seed1")?);
        Ok(spec.compile().sample(x, y))
    })?;
    globals.set("basis_noise", basis_noise_fn)?;

    let multioctave_fn = lua.create_function(|_, args: Table| {
        let x: f64 = args.get("x")?;
        let y: f64 = args.get("y")?;
        let spec = NoiseSpec::multioctave(
            args.get("seed0")?,
            args.get("seed1")?,
            args.get("octaves")?,
            args.get("persistence")?,
        );
        Ok(spec.compile().sample(x, y))
    })?;
    globals.set("multioctave_noise", multioctave_fn)?;

    // Tables are built once per noise_function call, not per sample.
    let noise_function_fn = lua.create_function(|lua, args: Table| {
        let function = spec_from_table(&args)?.compile();
        lua.create_function(move |_, (x, y): (f64, f64)| Ok(function.sample(x, y)))
    })?;
    globals.set("noise_function", noise_function_fn)?;

    Ok(())
}

/// Evaluate a Lua chunk with the noise globals registered.
pub fn run_script(source: &str) -> Result<f64> {
    let lua = Lua::new();
    register_noise_functions(&lua)?;
    Ok(lua.load(source).eval::<f64>()?)
}

#[cfg(test)]
mod tests {
    use factorio_noise::compile_noise_function;

    use super::*;

    #[test]
    fn test_random_generator() {
        let lua = Lua::new();
        register_noise_functions(&lua).unwrap();
        let draws: Vec<u32> = lua
            .load("local r = random_generator(100) return {r:next_int(), r:next_int(), r:next_int()}")
            .eval()
            .unwrap();
        assert_eq!(draws, vec![45438212, 1409544450, 3980732798]);

        let between: i64 = lua.load("return random_generator(1234):next_int_between(0, 256)").eval().unwrap();
        assert_eq!(between, 23);

        let float = run_script("return random_generator(200):next_float()").unwrap();
        assert_eq!(float, 45438212.0 / 4294967296.0);
    }

    #[test]
    fn test_negative_seed_clamps() {
        let draws: Vec<u32> = {
            let lua = Lua::new();
            register_noise_functions(&lua).unwrap();
            lua.load("local r = random_generator(-5) return {r:next_int(), r:next_int()}").eval().unwrap()
        };
        let mut rng = RandomGenerator::for_seed(341);
        assert_eq!(draws, vec![rng.next_int(), rng.next_int()]);
    }

    #[test]
    fn test_empty_range_is_error() {
        assert!(run_script("return random_generator(5):next_int_between(3, 3)").is_err());
    }

    #[test]
    fn test_basis_noise() {
        assert_eq!(run_script("return basis_noise{x = 4, y = -2, seed0 = 100, seed1 = 1}").unwrap(), 0.0);

        let expected = NoiseSpec::basis(100, 1).compile().sample(4.5, -2.25);
        let actual = run_script("return basis_noise{x = 4.5, y = -2.25, seed0 = 100, seed1 = 1}").unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_multioctave_noise() {
        let expected = NoiseSpec::multioctave(77, 5, 3.5, 0.6).compile().sample(10.5, 3.25);
        let actual = run_script(
            "return multioctave_noise{x = 10.5, y = 3.25, seed0 = 77, seed1 = 5, octaves = 3.5, persistence = 0.6}",
        )
        .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_noise_function() {
        let f = compile_noise_function(&NoiseSpec::multioctave(4000, 200, 4.0, 0.5));
        let actual = run_script(
            r#"
            local f = noise_function{functionName = "FactorioMultioctaveNoise", seed0 = 4000, seed1 = 200,
                                     octaveCount = 4, persistence = 0.5}
            return f(1.5, 2.5) + f(-7.25, 0.125)
            "#,
        )
        .unwrap();
        assert_eq!(actual, f(1.5, 2.5) + f(-7.25, 0.125));
    }

    #[test]
    fn test_noise_function_without_name_is_multioctave() {
        let f = compile_noise_function(&NoiseSpec::multioctave(12, 34, 3.0, 0.7));
        let actual = run_script(
            "local f = noise_function{seed0 = 12, seed1 = 34, octaveCount = 3, persistence = 0.7} return f(5.5, -9.25)",
        )
        .unwrap();
        assert_eq!(actual, f(5.5, -9.25));
    }

    #[test]
    fn test_seed1_out_of_range() {
        assert!(run_script("return basis_noise{x = 0.5, y = 0.5, seed0 = 1, seed1 = 300}").is_err());
    }
}
