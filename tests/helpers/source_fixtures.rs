//! Common source code fixtures for tests.

// Components
pub const HELLO_COMPONENT: &str = "@Component\nstruct Hello {\n  build() {\n    Text('hi')\n  }\n}\n";

pub const COUNTER_PAGE: &str = r#"import router from '@ohos.router'

@Entry
@Component
struct Counter {
  @State count: number = 0
  private label: string = 'Count'

  aboutToAppear() {
    this.count = 1
  }

  build() {
    Column() {
      Text(`${this.label}: ${this.count}`)
        .fontSize(24)
        .fontWeight(FontWeight.Bold)
      Button('Add')
        .onClick(() => {
          this.count += 1
        })
      if (this.count > 3) {
        Text('many')
      } else {
        Text('few')
      }
      ForEach(this.items, (item: string) => {
        Text(item)
      }, (item: string) => item)
    }
    .width('100%')
  }
}
"#;

pub const LIST_PAGE: &str = r#"@Component
struct Todo {
  @Prop items: string[] = []
  @Link selected: number

  build() {
    List() {
      ForEach(this.items, (item: string, index: number) => {
        ListItem() {
          Row() {
            Image($r('app.media.icon'))
            Text(item).fontColor(index == this.selected ? Color.Red : Color.Black)
          }
        }
      })
    }
  }
}
"#;

// Plain TypeScript
pub const PLAIN_SCRIPT: &str = r#"interface Point {
  x: number
  y: number
}

enum Direction { Up, Down }

class Shape {
  area(): number {
    return 0
  }
}

function distance(a: Point, b: Point): number {
  const dx = a.x - b.x
  const dy = a.y - b.y
  return Math.sqrt(dx * dx + dy * dy)
}

let total = distance({ x: 0, y: 0 }, { x: 3, y: 4 })
"#;

/// Every well-formed fixture
pub const WELL_FORMED: &[&str] = &[HELLO_COMPONENT, COUNTER_PAGE, LIST_PAGE, PLAIN_SCRIPT];

// Malformed
pub const UNCLOSED_CALL: &str =
    "@Component\nstruct Broken {\n  build() {\n    Text('Hello'\n  }\n}\n";

pub const UNCLOSED_STRUCT: &str = "@Component\nstruct Open {\n  build() {}\n";

pub const STRAY_BRACES: &str = "}}} let a = 1";

pub const UNDECORATED_UNCLOSED_CALL: &str = "struct A {\n  build() {\n    Text('Hello'\n  }\n}\n";

pub const CLASS_METHOD_ERROR: &str = "class C {\n  foo() {\n    let a = (1\n  }\n  bar() {}\n}\n";

pub const COMPONENT_METHOD_ERROR: &str =
    "@Component\nstruct A {\n  helper() {\n    let a = (1\n  }\n  build() {}\n}\n";

pub const INTERFACE_MEMBER_ERROR: &str = "interface I {\n  a: number;\n  b:\n}\n";
