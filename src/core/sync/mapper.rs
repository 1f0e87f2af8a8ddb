//! The type mapper: lazy loading of generated instance classes by CMS type
//! name.

use super::model::{instance_name, interface_name};
use super::typescript::{string_literal, CodeWriter};
use crate::core::constants;

const LOAD_TYPE: &str = r#"  protected async doLoadType(typeInfo: Loaders.TypeInfo) : Promise<Taxonomy.IContentType> {
    return import(
    /* webpackInclude: /\.ts$/ */
    /* webpackExclude: /\.noimport\.ts$/ */
    /* webpackChunkName: "types" */
    /* webpackMode: "lazy-once" */
    /* webpackPrefetch: true */
    /* webpackPreload: false */
    "./" + typeInfo.dataModel).then(exports => {
      return exports[typeInfo.instanceModel];
    }).catch(reason => {
      if (Core.DefaultContext.isDebugActive()) {
        console.error(`Error while importing ${typeInfo.instanceModel} from ${typeInfo.dataModel} due to:`, reason);
      }
      return null;
    });
  }
"#;

/// File name of the type mapper.
pub fn file_name() -> String {
    format!("{}.ts", constants::TYPE_MAPPER)
}

/// Render the type mapper for the given catalog names, in catalog order.
pub fn render(names: &[String]) -> String {
    let mut w = CodeWriter::with_indent("  ");

    w.line("import { Taxonomy, Core, Loaders } from '@episerver/spa-core';");
    w.blank();
    w.line(format!(
        "export default class {} extends Loaders.BaseTypeMapper {{",
        constants::TYPE_MAPPER
    ));
    w.indent();
    w.block(
        "protected map : { [type: string]: Loaders.TypeInfo } = {",
        "}",
        |w| {
            for name in names {
                w.line(format!(
                    "{}: {{dataModel: {},instanceModel: {}}},",
                    string_literal(name, '\''),
                    string_literal(&interface_name(name), '\''),
                    string_literal(&instance_name(name), '\'')
                ));
            }
        },
    );
    w.dedent();

    let mut out = w.finish();
    out.push_str(LOAD_TYPE);
    out.push_str("}\n");
    out
}
