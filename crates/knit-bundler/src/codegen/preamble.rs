//! The `require` runtime emitted at the top of every bundle.
//!
//! `require(id)` looks the id up in `modules`, creates a fresh
//! `module = { exports: {} }`, and calls the wrapper with a `localRequire`
//! that translates the module's own import strings through its mapping.

/// Runs the module body on every `require` call.
const EVALUATE_EACH_TIME: &str = r#"  function require(id) {
    if (!Object.prototype.hasOwnProperty.call(modules, id)) {
      throw new Error("Cannot find module '" + id + "'");
    }
    var fn = modules[id][0];
    var mapping = modules[id][1];

    function localRequire(name) {
      if (!mapping || !Object.prototype.hasOwnProperty.call(mapping, name)) {
        throw new Error("Cannot find module '" + name + "'");
      }
      return require(mapping[name]);
    }

    var module = { exports: {} };
    fn(localRequire, module, module.exports);
    return module.exports;
  }
"#;

/// Runs each module body once and hands out the same `module.exports`
/// afterwards. The module is cached before its body runs, so a cycle sees
/// the partially filled exports instead of recursing.
const EVALUATE_ONCE: &str = r#"  var cache = {};

  function require(id) {
    if (Object.prototype.hasOwnProperty.call(cache, id)) {
      return cache[id].exports;
    }
    if (!Object.prototype.hasOwnProperty.call(modules, id)) {
      throw new Error("Cannot find module '" + id + "'");
    }
    var fn = modules[id][0];
    var mapping = modules[id][1];

    function localRequire(name) {
      if (!mapping || !Object.prototype.hasOwnProperty.call(mapping, name)) {
        throw new Error("Cannot find module '" + name + "'");
      }
      return require(mapping[name]);
    }

    var module = { exports: {} };
    cache[id] = module;
    fn(localRequire, module, module.exports);
    return module.exports;
  }
"#;

/// Runtime text for the requested evaluation mode.
pub fn preamble(cache_modules: bool) -> &'static str {
    if cache_modules {
        EVALUATE_ONCE
    } else {
        EVALUATE_EACH_TIME
    }
}
